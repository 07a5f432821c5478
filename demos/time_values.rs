//! Example demonstrating timestamps, durations and generated values

use chrono::{DateTime, Utc};
use envtag::Populate;
use std::time::Duration;

#[derive(Debug, Default, Populate)]
struct Config {
    // strftime layout given with `format=`
    #[conf("RELEASE_DATE,format=%d %b %y %H:%M,default=01 May 20 11:11")]
    pub release_date: DateTime<Utc>,

    // `now` resolves to the load time
    #[conf("STARTED_AT,default=now")]
    pub started_at: DateTime<Utc>,

    #[conf("REQUEST_TIMEOUT,default=1m30s")]
    pub request_timeout: Duration,

    #[conf("RETRY_BACKOFF,default=1.5s")]
    pub retry_backoff: Option<Duration>,

    // `random` resolves to a value in [0, 1)
    #[conf("SAMPLE_RATE,default=random")]
    pub sample_rate: f64,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("REQUEST_TIMEOUT", "45s");

    let config = Config::from_env()?;

    println!("Configuration:");
    println!("  Release Date: {}", config.release_date);
    println!("  Started At: {}", config.started_at);
    println!("  Request Timeout: {:?}", config.request_timeout);
    println!("  Retry Backoff: {:?}", config.retry_backoff);
    println!("  Sample Rate: {:.3}", config.sample_rate);

    Ok(())
}
