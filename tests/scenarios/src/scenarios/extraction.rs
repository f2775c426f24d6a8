//! Extraction scenarios.
//!
//! Each test pastes one kind of input, triggers a sync and checks what was
//! shown and what reached the device.

#[cfg(test)]
mod tests {
    use crate::assertions::{
        assert_controls_wired, assert_input_echoed, assert_phase_sequence,
        assert_single_visible_status,
    };
    use crate::harness::{RenderedStatus, Scenario};
    use relay_core::state::{EXTRACTING_MESSAGE, SENDING_MESSAGE};
    use relay_core::status::Phase;
    use relay_plugin::SyncError;

    fn bare_token(len: usize) -> String {
        "AB12".chars().cycle().take(len).collect()
    }

    async fn sync_with(input: &str) -> (Scenario, Result<(), SyncError>) {
        let scenario = Scenario::new().unwrap();
        scenario.relay.on_change(input).unwrap();
        let result = scenario.relay.trigger_sync().await;
        (scenario, result)
    }

    #[tokio::test]
    async fn empty_input_shows_error_without_processing() {
        let (scenario, result) = sync_with("").await;

        assert_eq!(result, Err(SyncError::EmptyInput));
        assert_eq!(
            scenario.statuses(),
            vec![RenderedStatus::new(Phase::Error, "error: input is empty")]
        );
        assert!(scenario.delivered().is_empty());
    }

    #[tokio::test]
    async fn garbage_input_shows_invalid_format() {
        let (scenario, result) = sync_with("garbage").await;

        assert_eq!(result, Err(SyncError::InvalidCredential));
        assert_eq!(
            scenario.statuses(),
            vec![
                RenderedStatus::new(Phase::Processing, EXTRACTING_MESSAGE),
                RenderedStatus::new(Phase::Error, "error: invalid credential format"),
            ]
        );
        assert!(scenario.delivered().is_empty());
    }

    #[tokio::test]
    async fn whitespace_only_input_is_invalid_not_empty() {
        let (scenario, result) = sync_with("   ").await;

        assert_eq!(result, Err(SyncError::InvalidCredential));
        assert_eq!(scenario.phases(), vec![Phase::Processing, Phase::Error]);
    }

    #[tokio::test]
    async fn fragment_is_cut_from_full_header() {
        let (scenario, result) = sync_with("a=1; MUSIC_U=abc123; other=x").await;

        assert!(result.is_ok());
        assert_eq!(scenario.delivered(), vec!["MUSIC_U=abc123".to_string()]);
        assert_eq!(
            scenario.statuses()[..2],
            [
                RenderedStatus::new(Phase::Processing, EXTRACTING_MESSAGE),
                RenderedStatus::new(Phase::Processing, SENDING_MESSAGE),
            ]
        );
    }

    #[tokio::test]
    async fn first_fragment_wins() {
        let (scenario, _) = sync_with("MUSIC_U=first; MUSIC_U=second").await;

        assert_eq!(scenario.delivered(), vec!["MUSIC_U=first".to_string()]);
    }

    #[tokio::test]
    async fn bare_token_is_prefixed() {
        let token = bare_token(100);
        let (scenario, result) = sync_with(&format!("\n{}\t", token)).await;

        assert!(result.is_ok());
        assert_eq!(scenario.delivered(), vec![format!("MUSIC_U={}", token)]);
    }

    #[tokio::test]
    async fn short_bare_token_is_rejected() {
        let (scenario, result) = sync_with(&bare_token(99)).await;

        assert_eq!(result, Err(SyncError::InvalidCredential));
        assert!(scenario.delivered().is_empty());
    }

    #[tokio::test]
    async fn lowercase_bare_token_is_rejected() {
        let token = bare_token(120).to_lowercase();
        let (scenario, result) = sync_with(&token).await;

        assert_eq!(result, Err(SyncError::InvalidCredential));
        assert!(scenario.delivered().is_empty());
    }

    #[tokio::test]
    async fn every_render_is_well_formed() {
        let long = bare_token(150);
        for input in ["", "garbage", "MUSIC_U=ok", long.as_str()] {
            let (scenario, _) = sync_with(input).await;
            let history = scenario.history();

            assert!(assert_single_visible_status(&history).passed, "{:?}", input);
            assert!(
                assert_controls_wired(&history, &scenario.relay.controls()).passed,
                "{:?}",
                input
            );
            assert!(assert_input_echoed(&history, input).passed, "{:?}", input);
        }
    }

    #[tokio::test]
    async fn failed_extraction_sequence() {
        let (scenario, _) = sync_with("Path=/; Secure").await;

        let result = assert_phase_sequence(&scenario.history(), &[Phase::Processing, Phase::Error]);
        assert!(result.passed, "{:?}", result.failure_details);
    }
}
