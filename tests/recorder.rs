#[cfg(test)]
mod tests {
    use jtrack::libs::config::TimerConfig;
    use jtrack::libs::formatter::ZERO_DISPLAY;
    use jtrack::libs::recorder::TimeRecorder;
    use jtrack::libs::session::{SessionState, StopOutcome, TrackedItem};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time;

    fn item(key: &str) -> TrackedItem {
        TrackedItem::new(key, "Test issue")
    }

    fn recorder() -> TimeRecorder {
        TimeRecorder::new(TimerConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_after_three_seconds() {
        let recorder = recorder();
        let previous = recorder.start(item("X-1")).await;
        assert_eq!(previous, StopOutcome::NoActiveSession);
        assert_eq!(recorder.state(), SessionState::Active(item("X-1")));

        time::sleep(Duration::from_millis(3400)).await;
        let outcome = recorder.stop().await;

        let recorded = outcome.recorded().expect("session should be recorded");
        assert_eq!(recorded.item, item("X-1"));
        assert_eq!(recorded.elapsed.as_secs(), 3);
        assert_eq!(recorded.minutes(), 0);
        assert_eq!(recorded.display(), "00:00:03");
        assert_eq!(recorder.state(), SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_advances_every_tick() {
        let recorder = recorder();
        recorder.start(item("X-1")).await;
        assert_eq!(recorder.display(), ZERO_DISPLAY);

        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(recorder.display(), "00:00:01");

        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(recorder.display(), "00:00:02");

        recorder.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_resets_after_stop() {
        let recorder = recorder();
        recorder.start(item("X-1")).await;
        time::sleep(Duration::from_millis(2500)).await;
        assert_ne!(recorder.display(), ZERO_DISPLAY);

        recorder.stop().await;
        assert_eq!(recorder.display(), ZERO_DISPLAY);

        // Stopping with nothing running still leaves the display at zero.
        recorder.stop().await;
        assert_eq!(recorder.display(), ZERO_DISPLAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let recorder = recorder();
        recorder.start(item("X-1")).await;
        time::sleep(Duration::from_secs(1)).await;

        assert!(matches!(recorder.stop().await, StopOutcome::Recorded(_)));
        assert_eq!(recorder.stop().await, StopOutcome::NoActiveSession);
        assert_eq!(recorder.state(), SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_without_session() {
        let recorder = recorder();
        assert_eq!(recorder.stop().await, StopOutcome::NoActiveSession);
        assert_eq!(recorder.state(), SessionState::Idle);
        assert_eq!(recorder.display(), ZERO_DISPLAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_hands_off_previous_session() {
        let recorder = recorder();
        recorder.start(item("A-1")).await;
        time::sleep(Duration::from_millis(1500)).await;

        let previous = recorder.start(item("B-2")).await;
        let recorded = previous.recorded().expect("previous session should be recorded");
        assert_eq!(recorded.item, item("A-1"));
        assert_eq!(recorded.elapsed, Duration::from_millis(1500));

        assert_eq!(recorder.state(), SessionState::Active(item("B-2")));
        assert_eq!(recorder.display(), ZERO_DISPLAY);

        time::sleep(Duration::from_secs(2)).await;
        let outcome = recorder.stop().await;
        let recorded = outcome.recorded().expect("second session should be recorded");
        assert_eq!(recorded.item, item("B-2"));
        assert_eq!(recorded.elapsed, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recordable_minutes_are_truncated() {
        let recorder = recorder();
        recorder.start(item("X-1")).await;
        time::sleep(Duration::from_secs(119)).await;

        let outcome = recorder.stop().await;
        assert_eq!(outcome.recorded().map(|r| r.minutes()), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_subscribers_see_transitions() {
        let recorder = recorder();
        let mut state = recorder.subscribe_state();
        assert_eq!(*state.borrow_and_update(), SessionState::Idle);

        recorder.start(item("X-1")).await;
        assert!(state.has_changed().unwrap());
        assert_eq!(*state.borrow_and_update(), SessionState::Active(item("X-1")));

        recorder.stop().await;
        assert!(state.has_changed().unwrap());
        assert_eq!(*state.borrow_and_update(), SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_subscribers_receive_ticks() {
        let recorder = recorder();
        let mut display = recorder.subscribe_display();
        recorder.start(item("X-1")).await;
        display.borrow_and_update();

        display.changed().await.unwrap();
        assert_eq!(*display.borrow_and_update(), "00:00:01");

        recorder.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_starts_are_linearized() {
        let recorder = Arc::new(recorder());
        let mut handles = Vec::new();
        for i in 0..10 {
            let recorder = Arc::clone(&recorder);
            handles.push(tokio::spawn(async move { recorder.start(item(&format!("C-{}", i))).await }));
        }

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }

        // Only the first start found nothing running; every other start ended one session.
        let empty = outcomes.iter().filter(|o| **o == StopOutcome::NoActiveSession).count();
        let recorded = outcomes.iter().filter(|o| o.recorded().is_some()).count();
        assert_eq!(empty, 1);
        assert_eq!(recorded, 9);

        let SessionState::Active(last) = recorder.state() else {
            panic!("one session should still be active");
        };
        let final_outcome = recorder.stop().await;
        assert_eq!(final_outcome.recorded().map(|r| r.item.clone()), Some(last.clone()));

        // The final item was not handed back by any start.
        assert!(outcomes.iter().all(|o| o.recorded().map(|r| &r.item) != Some(&last)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_mixed_start_stop_never_leaks_sessions() {
        let config = TimerConfig {
            tick_interval: 10,
            stop_deadline: 1000,
        };
        let recorder = Arc::new(TimeRecorder::new(config));
        let starts = 20;
        let stops = 15;

        let mut handles = Vec::new();
        for i in 0..starts {
            let recorder = Arc::clone(&recorder);
            handles.push(tokio::spawn(async move { recorder.start(item(&format!("M-{}", i))).await }));
        }
        for _ in 0..stops {
            let recorder = Arc::clone(&recorder);
            handles.push(tokio::spawn(async move { recorder.stop().await }));
        }

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }
        outcomes.push(recorder.stop().await);

        // Every started session is ended by exactly one later transition.
        let ended = outcomes.iter().filter(|o| **o != StopOutcome::NoActiveSession).count();
        assert_eq!(ended, starts);
        assert_eq!(recorder.state(), SessionState::Idle);
        assert_eq!(recorder.display(), ZERO_DISPLAY);
    }
}
