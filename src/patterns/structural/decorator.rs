//! Decorator: stack notification channels around a base notifier.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

pub trait Notifier: Send + Sync {
    fn send(&self, message: &str, console: &dyn Console);
}

pub struct BaseNotifier;

impl Notifier for BaseNotifier {
    fn send(&self, message: &str, console: &dyn Console) {
        console.write_line(&format!(
            "Notifier: sending and notifiy users with message : {}",
            message
        ));
    }
}

macro_rules! notifier_decorator {
    ($name:ident, $announcement:expr) => {
        pub struct $name {
            wrapped: Box<dyn Notifier>,
        }

        impl $name {
            pub fn new(wrapped: Box<dyn Notifier>) -> Self {
                Self { wrapped }
            }
        }

        impl Notifier for $name {
            fn send(&self, message: &str, console: &dyn Console) {
                console.write_line($announcement);
                self.wrapped.send(message, console);
            }
        }
    };
}

notifier_decorator!(EmailDecorator, "im sending email");
notifier_decorator!(SmsDecorator, "im sending SMS message");
notifier_decorator!(FacebookDecorator, "im sending Facebook notification");
notifier_decorator!(SlackDecorator, "im sending Slack notification");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Facebook,
    Slack,
}

impl FromStr for Channel {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Channel::Email),
            "sms" => Ok(Channel::Sms),
            "facebook" => Ok(Channel::Facebook),
            "slack" => Ok(Channel::Slack),
            other => Err(CatalogError::InvalidConfigValueError {
                field: "decorator.channels".to_string(),
                value: other.to_string(),
                reason: "Expected one of email, sms, facebook, slack".to_string(),
            }),
        }
    }
}

/// Wraps decorators around [`BaseNotifier`] in list order, so the last
/// channel ends up outermost and announces itself first.
#[derive(Debug, Clone, Default)]
pub struct NotifierStack {
    channels: Vec<Channel>,
}

impl NotifierStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn build(&self) -> Box<dyn Notifier> {
        self.channels
            .iter()
            .fold(
                Box::new(BaseNotifier) as Box<dyn Notifier>,
                |inner, channel| -> Box<dyn Notifier> {
                    match channel {
                        Channel::Email => Box::new(EmailDecorator::new(inner)),
                        Channel::Sms => Box::new(SmsDecorator::new(inner)),
                        Channel::Facebook => Box::new(FacebookDecorator::new(inner)),
                        Channel::Slack => Box::new(SlackDecorator::new(inner)),
                    }
                },
            )
    }
}

impl From<&[Channel]> for NotifierStack {
    fn from(channels: &[Channel]) -> Self {
        Self {
            channels: channels.to_vec(),
        }
    }
}

pub const DEFAULT_CHANNELS: [Channel; 4] = [
    Channel::Slack,
    Channel::Facebook,
    Channel::Sms,
    Channel::Email,
];

pub fn client_code(notifier: &dyn Notifier, console: &dyn Console) {
    notifier.send("Client code : ", console);
}

pub struct DecoratorDemo {
    channels: Vec<Channel>,
}

impl DecoratorDemo {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }
}

impl Default for DecoratorDemo {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNELS.to_vec())
    }
}

#[async_trait]
impl Demo for DecoratorDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "decorator",
            title: "Decorator",
            category: PatternCategory::Structural,
            summary: "Attaches new behaviors to objects by placing them inside wrapper objects",
            complexity: 2,
            popularity: 2,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        let notifier = NotifierStack::from(self.channels.as_slice()).build();
        client_code(notifier.as_ref(), console.as_ref());
        Ok(())
    }
}
