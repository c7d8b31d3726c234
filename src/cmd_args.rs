use std::ffi::OsString;

pub use clap::Parser;

use crate::config::DEFAULT_TIMEOUT_SECS;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Base URL of the calculation API.
    /// Falls back to $CALCLINE_API_URL, then to http://localhost:8080/api/v1.
    #[clap(short = 'u', long, help = "calculation API base URL")]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[clap(
        short = 't',
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "request timeout in seconds"
    )]
    timeout: u64,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    api_url: Option<String>,
    timeout: u64,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        let args = ClapArgs::parse();
        Self {
            api_url: args.api_url,
            timeout: args.timeout,
        }
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = ClapArgs::parse_from(itr);
        Self {
            api_url: args.api_url,
            timeout: args.timeout,
        }
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn timeout(&self) -> u64 {
        self.timeout
    }
}
