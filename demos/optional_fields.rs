//! Example demonstrating Option<T> fields

use envtag::{Populate, UriRef};
use url::Url;

#[derive(Debug, Default, Populate)]
struct Config {
    // Plain field: set to the parsed value
    #[conf("APP_NAME,default=my-application")]
    pub app_name: String,

    // Optional fields: set to Some(parsed value)
    #[conf("API_URL,default=https://api.example.com/v1")]
    pub api_url: Option<Url>,

    // URI references may be relative; unset without a default gives ""
    #[conf("CALLBACK_PATH,default=/hooks/deploy?v=2")]
    pub callback_path: Option<UriRef<String>>,

    #[conf("PORT,default=8080")]
    pub port: Option<isize>,

    // Skipped fields stay None
    #[conf("-")]
    pub override_port: Option<isize>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("PORT", "9090");

    let config = Config::from_env()?;

    println!("Configuration:");
    println!("  App Name: {}", config.app_name);
    println!("  API URL: {:?}", config.api_url.as_ref().map(Url::as_str)); // Some(..)
    println!("  Callback: {:?}", config.callback_path.as_ref().map(|uri| uri.as_str()));
    println!("  Port: {:?}", config.port); // Some(9090)
    println!("  Override Port: {:?}", config.override_port); // None

    Ok(())
}
