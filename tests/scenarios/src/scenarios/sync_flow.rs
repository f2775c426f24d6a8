//! Sync flow scenarios.
//!
//! Full attempts from trigger to settled status, including device failures
//! and the timed return to the default status.

#[cfg(test)]
mod tests {
    use crate::assertions::{assert_phase_sequence, assert_single_visible_status};
    use crate::harness::{RenderedStatus, Scenario};
    use relay_core::state::{EXTRACTING_MESSAGE, SENDING_MESSAGE};
    use relay_core::status::{Phase, READY_TEXT, SUCCESS_TEXT};
    use relay_plugin::{RelaySettings, SyncError};
    use relay_types::ConfigMap;
    use std::time::Duration;

    const HEADER: &str = "MUSIC_U=XYZ; Path=/";

    /// Successful attempt renders Processing twice, Success, then Default after 3s.
    #[tokio::test(start_paused = true)]
    async fn success_resets_after_three_seconds() {
        let scenario = Scenario::new().unwrap();
        scenario.relay.on_change(HEADER).unwrap();

        scenario.relay.trigger_sync().await.unwrap();

        assert_eq!(scenario.delivered(), vec!["MUSIC_U=XYZ".to_string()]);
        assert_eq!(
            scenario.statuses(),
            vec![
                RenderedStatus::new(Phase::Processing, EXTRACTING_MESSAGE),
                RenderedStatus::new(Phase::Processing, SENDING_MESSAGE),
                RenderedStatus::new(Phase::Success, SUCCESS_TEXT),
            ]
        );

        tokio::time::sleep(Duration::from_millis(2_999)).await;
        assert_eq!(scenario.relay.current_phase(), Phase::Success);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(
            scenario.last_status(),
            Some(RenderedStatus::new(Phase::Default, READY_TEXT))
        );

        let history = scenario.history();
        assert!(assert_single_visible_status(&history).passed);
        assert!(
            assert_phase_sequence(
                &history,
                &[Phase::Processing, Phase::Processing, Phase::Success, Phase::Default]
            )
            .passed
        );
    }

    /// Device rejection ends in Error with the connectivity hint and never resets.
    #[tokio::test(start_paused = true)]
    async fn send_rejection_stays_on_error() {
        let scenario = Scenario::new().unwrap();
        scenario.relay.on_change("A".repeat(100)).unwrap();
        scenario.host.fail_next_send("no paired device");

        let result = scenario.relay.trigger_sync().await;

        assert!(matches!(result, Err(SyncError::SendFailed(_))));
        assert_eq!(
            scenario.last_status(),
            Some(RenderedStatus::new(
                Phase::Error,
                "error: send failed, check device connection"
            ))
        );

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(
            scenario.phases(),
            vec![Phase::Processing, Phase::Processing, Phase::Error]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn configured_reset_delay_is_honored() {
        let settings = RelaySettings::default().with_reset_delay_secs(10);
        let scenario = Scenario::with_settings(settings, ConfigMap::new()).unwrap();
        scenario.relay.on_change(HEADER).unwrap();

        scenario.relay.trigger_sync().await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(scenario.relay.current_phase(), Phase::Success);

        scenario.wait_past_reset().await;
        assert_eq!(scenario.relay.current_phase(), Phase::Default);
    }

    #[tokio::test]
    async fn payload_goes_to_configured_app() {
        let settings = RelaySettings::default().with_target_app("com.example.player");
        let scenario = Scenario::with_settings(settings, ConfigMap::new()).unwrap();
        scenario.relay.on_change(HEADER).unwrap();

        scenario.relay.trigger_sync().await.unwrap();

        let sent = scenario.host.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].target_app, "com.example.player");
    }

    #[tokio::test]
    async fn rejected_ui_update_does_not_stop_delivery() {
        let scenario = Scenario::new().unwrap();
        scenario.relay.on_change(HEADER).unwrap();
        scenario.host.fail_next_ui("panel closed");

        scenario.relay.trigger_sync().await.unwrap();

        // First Processing render was dropped by the host
        assert_eq!(scenario.delivered().len(), 1);
        assert_eq!(
            scenario.phases(),
            vec![Phase::Processing, Phase::Success]
        );
    }

    #[tokio::test]
    async fn retry_after_device_failure() {
        let scenario = Scenario::new().unwrap();
        scenario.relay.on_change(HEADER).unwrap();
        scenario.host.fail_next_send("offline");

        assert!(scenario.relay.trigger_sync().await.is_err());
        scenario.relay.trigger_sync().await.unwrap();

        assert_eq!(scenario.delivered(), vec!["MUSIC_U=XYZ".to_string()]);
        assert_eq!(
            scenario.phases(),
            vec![
                Phase::Processing,
                Phase::Processing,
                Phase::Error,
                Phase::Processing,
                Phase::Processing,
                Phase::Success,
            ]
        );
    }

    #[tokio::test]
    async fn input_edited_after_error_is_used_by_retry() {
        let scenario = Scenario::new().unwrap();
        scenario.relay.on_change("garbage").unwrap();
        assert!(scenario.relay.trigger_sync().await.is_err());

        scenario.relay.on_change(HEADER).unwrap();
        scenario.relay.trigger_sync().await.unwrap();

        assert_eq!(scenario.delivered(), vec!["MUSIC_U=XYZ".to_string()]);
    }
}
