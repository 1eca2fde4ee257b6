use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::force::Force;
use crate::transport::DEFAULT_BASE_URL;


pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientOptions {
    pub base_url: Url,
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    // Drop reconciliation responses that arrive after a newer reconciliation has already been
    // applied. Off: the last response received wins, whatever its age.
    pub discard_stale_responses: bool,
    pub computer_force: Force,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            base_url: default_base_url(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            discard_stale_responses: false,
            computer_force: Force::Black,
        }
    }
}

pub fn default_base_url() -> Url {
    // Improvement potential. Make this a `const` when `url` supports const construction.
    match Url::parse(DEFAULT_BASE_URL) {
        Ok(url) => url,
        Err(err) => panic!("{}", crate::internal_error_message!("{err}")),
    }
}
