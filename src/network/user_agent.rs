//! Browser identification headers
//!
//! The scraped backend serves a different page shape to clients that do not
//! look like a desktop browser, so outgoing requests carry a realistic set.

use rand::seq::SliceRandom;
use rand::Rng;

const CHROME_VERSIONS: [&str; 6] = [
    "120.0.0.0",
    "121.0.0.0",
    "122.0.0.0",
    "123.0.0.0",
    "124.0.0.0",
    "125.0.0.0",
];

const FIREFOX_VERSIONS: [&str; 5] = ["121.0", "122.0", "123.0", "124.0", "125.0"];

const SAFARI_VERSIONS: [&str; 3] = ["17.2", "17.3", "17.4"];

const DESKTOP_OS: [&str; 5] = [
    "Windows NT 10.0; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "Macintosh; Intel Mac OS X 14_2_1",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
];

/// Generate a random but realistic desktop user agent string
pub fn generate_user_agent() -> String {
    let mut rng = rand::thread_rng();

    let os = DESKTOP_OS.choose(&mut rng).copied().unwrap_or(DESKTOP_OS[0]);

    match rng.gen_range(0..10u8) {
        // Chrome (60%)
        0..=5 => {
            let chrome = CHROME_VERSIONS
                .choose(&mut rng)
                .copied()
                .unwrap_or(CHROME_VERSIONS[0]);
            format!(
                "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
                os, chrome
            )
        }
        // Firefox (30%)
        6..=8 => {
            let firefox = FIREFOX_VERSIONS
                .choose(&mut rng)
                .copied()
                .unwrap_or(FIREFOX_VERSIONS[0]);
            format!(
                "Mozilla/5.0 ({}; rv:{}) Gecko/20100101 Firefox/{}",
                os, firefox, firefox
            )
        }
        // Safari, Mac only
        _ => {
            let safari = SAFARI_VERSIONS
                .choose(&mut rng)
                .copied()
                .unwrap_or(SAFARI_VERSIONS[0]);
            format!(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_2_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/{} Safari/605.1.15",
                safari
            )
        }
    }
}

/// Standard accept header for HTML requests
pub fn accept_html() -> &'static str {
    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
}

/// Standard accept header for JSON APIs
pub fn accept_json() -> &'static str {
    "application/json"
}

/// Accept-Language value for a primary language tag
pub fn accept_language(lang: &str) -> String {
    let lang = lang.trim();
    if lang.is_empty() || lang == "all" {
        return "en-US,en;q=0.5".to_string();
    }

    match lang.split_once('-') {
        Some((primary, _)) => format!("{},{};q=0.5", lang, primary),
        None if lang == "en" => "en-US,en;q=0.5".to_string(),
        None => format!("{},en;q=0.5", lang),
    }
}
