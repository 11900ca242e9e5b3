use landalytics_engine::{ClientSettings, ScanError};

#[test]
fn missing_base_url_is_a_configuration_error() {
    let err = ClientSettings::from_base_url(None).unwrap_err();
    assert_eq!(err, ScanError::EndpointNotConfigured);

    // Set-but-empty is as unconfigured as unset.
    let err = ClientSettings::from_base_url(Some("   ".to_string())).unwrap_err();
    assert_eq!(err, ScanError::EndpointNotConfigured);
}

#[test]
fn unparseable_base_url_is_rejected() {
    let err = ClientSettings::from_base_url(Some("not a url".to_string())).unwrap_err();
    assert!(matches!(err, ScanError::InvalidEndpoint { .. }));
}

#[test]
fn analyze_endpoint_joins_the_api_path() {
    let settings = ClientSettings::from_base_url(Some("https://api.example.com".to_string()))
        .expect("valid base");
    assert_eq!(
        settings.analyze_endpoint().unwrap().as_str(),
        "https://api.example.com/api/v1/analyze"
    );
}

#[test]
fn analyze_endpoint_preserves_a_base_path_prefix() {
    // Without the trailing-slash fixup, Url::join would replace "v2".
    let settings =
        ClientSettings::from_base_url(Some("https://api.example.com/v2".to_string()))
            .expect("valid base");
    assert_eq!(
        settings.analyze_endpoint().unwrap().as_str(),
        "https://api.example.com/v2/api/v1/analyze"
    );
}
