use bid_docs_extractor::browser::{launch_headless_browser, session, Credentials};
use bid_docs_extractor::config::Config;
use bid_docs_extractor::utils::logging;

#[tokio::test]
#[ignore] // needs a Chrome install and portal credentials: cargo test -- --ignored
async fn test_live_login() {
    // Console logging
    logging::init();

    // Configuration from the environment
    let config = Config::from_env();

    // Launch the headless browser
    let (_browser, page) = launch_headless_browser(&config)
        .await
        .expect("browser launch failed");

    // Credentials must be present in GEPS_USERNAME / GEPS_PASSWORD
    let credentials = Credentials::from_env().expect("credentials not set");

    session::login(&page, &config.urls, &credentials)
        .await
        .expect("login failed");

    let url = page.url().await.expect("url query failed");
    assert!(
        !session::is_login_surface(url.as_deref().unwrap_or_default()),
        "still on the login page after login"
    );
}
