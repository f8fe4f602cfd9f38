pub mod behavioral;
pub mod creational;
pub mod structural;

use behavioral::chain_of_responsibility::DEFAULT_BLACKLIST;
use behavioral::iterator::NetworkKind;
use creational::factory_method::Platform;
use structural::decorator::{Channel, DEFAULT_CHANNELS};
use std::time::Duration;

/// Knobs the configurable demos read when the registry builds them.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSettings {
    pub blacklisted_ips: Vec<String>,
    pub network: NetworkKind,
    pub channels: Vec<Channel>,
    pub platform: Platform,
    pub proxy_latency: Duration,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            blacklisted_ips: DEFAULT_BLACKLIST.iter().map(|ip| ip.to_string()).collect(),
            network: NetworkKind::default(),
            channels: DEFAULT_CHANNELS.to_vec(),
            platform: Platform::default(),
            proxy_latency: Duration::from_millis(20),
        }
    }
}
