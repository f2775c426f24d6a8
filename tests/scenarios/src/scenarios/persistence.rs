//! Persistence scenarios.
//!
//! The pasted input survives a restart through the host config store, and
//! store failures never cost the user their in-memory input.

#[cfg(test)]
mod tests {
    use crate::harness::{input_value, RenderedStatus, Scenario};
    use relay_core::status::{Phase, PROMPT_TEXT, READY_TEXT};
    use relay_plugin::{PersistError, RelaySettings};
    use relay_types::ConfigMap;
    use serde_json::json;

    fn config_with(key: &str, value: serde_json::Value) -> ConfigMap {
        let mut config = ConfigMap::new();
        config.insert(key.to_string(), value);
        config
    }

    #[tokio::test]
    async fn input_survives_restart() {
        let first = Scenario::new().unwrap();
        first.relay.on_change("MUSIC_U=XYZ").unwrap();

        // New install over the same stored config
        let restarted =
            Scenario::with_settings(RelaySettings::default(), first.host.config()).unwrap();
        restarted.relay.on_load().unwrap();

        assert_eq!(restarted.relay.raw_input(), "MUSIC_U=XYZ");
        assert_eq!(
            restarted.last_status(),
            Some(RenderedStatus::new(Phase::Default, READY_TEXT))
        );
        restarted.relay.trigger_sync().await.unwrap();
        assert_eq!(restarted.delivered(), vec!["MUSIC_U=XYZ".to_string()]);
    }

    #[test]
    fn first_load_prompts_for_input() {
        let scenario = Scenario::new().unwrap();
        scenario.relay.on_load().unwrap();

        let history = scenario.history();
        assert_eq!(history.len(), 1);
        assert_eq!(input_value(&history[0]), Some(""));
        assert_eq!(
            scenario.last_status(),
            Some(RenderedStatus::new(Phase::Default, PROMPT_TEXT))
        );
    }

    #[test]
    fn null_saved_value_is_treated_as_absent() {
        let scenario = Scenario::with_settings(
            RelaySettings::default(),
            config_with("savedCookie", serde_json::Value::Null),
        )
        .unwrap();

        scenario.relay.on_load().unwrap();
        assert_eq!(scenario.relay.raw_input(), "");
    }

    #[test]
    fn non_string_saved_value_is_reported_and_ignored() {
        let scenario =
            Scenario::with_settings(RelaySettings::default(), config_with("savedCookie", json!(42)))
                .unwrap();

        let result = scenario.relay.on_load();

        assert!(matches!(result, Err(PersistError::Invalid(_))));
        assert_eq!(scenario.relay.raw_input(), "");
        assert_eq!(
            scenario.last_status(),
            Some(RenderedStatus::new(Phase::Default, PROMPT_TEXT))
        );
    }

    #[test]
    fn write_failure_keeps_typed_value() {
        let scenario = Scenario::new().unwrap();
        scenario.relay.on_change("MUSIC_U=old").unwrap();
        scenario.host.fail_next_write("disk full");

        let result = scenario.relay.on_change("MUSIC_U=new");

        assert!(result.is_err());
        assert_eq!(scenario.relay.raw_input(), "MUSIC_U=new");
        assert_eq!(scenario.saved_input().as_deref(), Some("MUSIC_U=old"));
    }

    #[test]
    fn write_failure_through_callback_is_swallowed() {
        let scenario = Scenario::new().unwrap();
        scenario.host.fail_next_write("disk full");

        let input = scenario.relay.controls().input;
        assert!(scenario.host.invoke(input, Some("MUSIC_U=typed".into())));

        assert_eq!(scenario.relay.raw_input(), "MUSIC_U=typed");
        assert_eq!(scenario.saved_input(), None);

        // Next edit persists normally
        assert!(scenario.host.invoke(input, Some("MUSIC_U=again".into())));
        assert_eq!(scenario.saved_input().as_deref(), Some("MUSIC_U=again"));
    }

    #[test]
    fn other_config_keys_are_preserved() {
        let mut config = config_with("theme", json!("dark"));
        config.insert("volume".into(), json!(7));
        let scenario = Scenario::with_settings(RelaySettings::default(), config).unwrap();

        scenario.relay.on_change("MUSIC_U=XYZ").unwrap();

        let stored = scenario.host.config();
        assert_eq!(stored.get("theme"), Some(&json!("dark")));
        assert_eq!(stored.get("volume"), Some(&json!(7)));
        assert_eq!(stored.get("savedCookie"), Some(&json!("MUSIC_U=XYZ")));
    }

    #[test]
    fn input_is_saved_verbatim() {
        let scenario = Scenario::new().unwrap();
        let raw = "  a=1; MUSIC_U=XYZ; Path=/  ";

        scenario.relay.on_change(raw).unwrap();

        assert_eq!(scenario.saved_input().as_deref(), Some(raw));
    }

    #[test]
    fn custom_config_key() {
        let settings = RelaySettings {
            config_key: "musicCookie".into(),
            ..RelaySettings::default()
        };
        let scenario = Scenario::with_settings(settings, ConfigMap::new()).unwrap();

        scenario.relay.on_change("MUSIC_U=XYZ").unwrap();

        assert_eq!(scenario.saved_input().as_deref(), Some("MUSIC_U=XYZ"));
        assert!(scenario.host.config().get("savedCookie").is_none());
    }
}
