//! Bridge: split an abstraction from its implementation so both sides can
//! vary on their own.

use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::{Console, Demo};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Primitive operations a platform provides.
pub trait Implementation {
    fn operation_implementation(&self) -> String;
}

pub struct ConcreteImplementationA;

impl Implementation for ConcreteImplementationA {
    fn operation_implementation(&self) -> String {
        "ConcreteImplementationA: Here's the result on the platform A.".to_string()
    }
}

pub struct ConcreteImplementationB;

impl Implementation for ConcreteImplementationB {
    fn operation_implementation(&self) -> String {
        "ConcreteImplementationB: Here's the result on the platform B.".to_string()
    }
}

/// The "control" side; delegates the real work to an [`Implementation`].
pub trait Abstraction {
    fn operation(&self) -> String;
}

pub struct BasicAbstraction {
    implementation: Box<dyn Implementation>,
}

impl BasicAbstraction {
    pub fn new(implementation: Box<dyn Implementation>) -> Self {
        Self { implementation }
    }
}

impl Abstraction for BasicAbstraction {
    fn operation(&self) -> String {
        format!(
            "Abstraction: Base operation with:\n{}",
            self.implementation.operation_implementation()
        )
    }
}

pub struct ExtendedAbstraction {
    implementation: Box<dyn Implementation>,
}

impl ExtendedAbstraction {
    pub fn new(implementation: Box<dyn Implementation>) -> Self {
        Self { implementation }
    }
}

impl Abstraction for ExtendedAbstraction {
    fn operation(&self) -> String {
        format!(
            "ExtendedAbstraction: Extended operation with:\n{}",
            self.implementation.operation_implementation()
        )
    }
}

pub fn client_code(abstraction: &dyn Abstraction, console: &dyn Console) {
    for line in abstraction.operation().lines() {
        console.write_line(line);
    }
}

// Devices and remotes

pub const MAX_VOLUME: u8 = 100;
pub const MIN_CHANNEL: u32 = 1;

pub trait Device {
    fn is_enabled(&self) -> bool;
    fn enable(&mut self);
    fn disable(&mut self);
    fn volume(&self) -> u8;
    /// Values above [`MAX_VOLUME`] are clamped.
    fn set_volume(&mut self, percent: u8);
    fn channel(&self) -> u32;
    /// Values below [`MIN_CHANNEL`] are clamped.
    fn set_channel(&mut self, channel: u32);
    fn status(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DeviceState {
    on: bool,
    volume: u8,
    channel: u32,
}

impl DeviceState {
    fn new(volume: u8) -> Self {
        Self {
            on: false,
            volume,
            channel: MIN_CHANNEL,
        }
    }

    fn set_volume(&mut self, percent: u8) {
        self.volume = percent.min(MAX_VOLUME);
    }

    fn set_channel(&mut self, channel: u32) {
        self.channel = channel.max(MIN_CHANNEL);
    }

    fn power_label(&self) -> &'static str {
        if self.on {
            "enabled"
        } else {
            "disabled"
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tv {
    state: DeviceState,
}

impl Tv {
    pub fn new() -> Self {
        Self {
            state: DeviceState::new(30),
        }
    }
}

impl Default for Tv {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Tv {
    fn is_enabled(&self) -> bool {
        self.state.on
    }

    fn enable(&mut self) {
        self.state.on = true;
    }

    fn disable(&mut self) {
        self.state.on = false;
    }

    fn volume(&self) -> u8 {
        self.state.volume
    }

    fn set_volume(&mut self, percent: u8) {
        self.state.set_volume(percent);
    }

    fn channel(&self) -> u32 {
        self.state.channel
    }

    fn set_channel(&mut self, channel: u32) {
        self.state.set_channel(channel);
    }

    fn status(&self) -> String {
        format!(
            "TV is {}, volume {}%, channel {}",
            self.state.power_label(),
            self.state.volume,
            self.state.channel
        )
    }
}

#[derive(Debug, Clone)]
pub struct Radio {
    state: DeviceState,
}

impl Radio {
    pub fn new() -> Self {
        Self {
            state: DeviceState::new(20),
        }
    }
}

impl Default for Radio {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Radio {
    fn is_enabled(&self) -> bool {
        self.state.on
    }

    fn enable(&mut self) {
        self.state.on = true;
    }

    fn disable(&mut self) {
        self.state.on = false;
    }

    fn volume(&self) -> u8 {
        self.state.volume
    }

    fn set_volume(&mut self, percent: u8) {
        self.state.set_volume(percent);
    }

    fn channel(&self) -> u32 {
        self.state.channel
    }

    fn set_channel(&mut self, channel: u32) {
        self.state.set_channel(channel);
    }

    fn status(&self) -> String {
        format!(
            "Radio is {}, volume {}%, station {}",
            self.state.power_label(),
            self.state.volume,
            self.state.channel
        )
    }
}

/// Remote side of the bridge. Implementors only expose their device.
pub trait Remote {
    fn device(&self) -> &dyn Device;
    fn device_mut(&mut self) -> &mut dyn Device;

    fn toggle_power(&mut self) {
        let device = self.device_mut();
        if device.is_enabled() {
            device.disable();
        } else {
            device.enable();
        }
    }

    fn volume_down(&mut self) {
        let device = self.device_mut();
        let current = device.volume();
        device.set_volume(current.saturating_sub(10));
    }

    fn volume_up(&mut self) {
        let device = self.device_mut();
        let current = device.volume();
        device.set_volume(current.saturating_add(10));
    }

    fn channel_down(&mut self) {
        let device = self.device_mut();
        let current = device.channel();
        device.set_channel(current.saturating_sub(1));
    }

    fn channel_up(&mut self) {
        let device = self.device_mut();
        let current = device.channel();
        device.set_channel(current.saturating_add(1));
    }
}

pub struct RemoteControl {
    device: Box<dyn Device>,
}

impl RemoteControl {
    pub fn new(device: Box<dyn Device>) -> Self {
        Self { device }
    }
}

impl Remote for RemoteControl {
    fn device(&self) -> &dyn Device {
        self.device.as_ref()
    }

    fn device_mut(&mut self) -> &mut dyn Device {
        self.device.as_mut()
    }
}

pub struct AdvancedRemoteControl {
    device: Box<dyn Device>,
}

impl AdvancedRemoteControl {
    pub fn new(device: Box<dyn Device>) -> Self {
        Self { device }
    }

    pub fn mute(&mut self) {
        self.device.set_volume(0);
    }
}

impl Remote for AdvancedRemoteControl {
    fn device(&self) -> &dyn Device {
        self.device.as_ref()
    }

    fn device_mut(&mut self) -> &mut dyn Device {
        self.device.as_mut()
    }
}

pub fn devices_client_code(console: &dyn Console) {
    let mut tv_remote = RemoteControl::new(Box::new(Tv::new()));
    let mut radio_remote = AdvancedRemoteControl::new(Box::new(Radio::new()));

    tv_remote.toggle_power();
    radio_remote.toggle_power();
    tv_remote.channel_up();
    radio_remote.channel_up();
    tv_remote.volume_up();
    radio_remote.volume_up();

    console.write_line(&tv_remote.device().status());
    console.write_line(&radio_remote.device().status());

    radio_remote.mute();
    console.write_line(&radio_remote.device().status());
}

pub struct BridgeDemo;

#[async_trait]
impl Demo for BridgeDemo {
    fn info(&self) -> DemoInfo {
        DemoInfo {
            name: "bridge",
            title: "Bridge",
            category: PatternCategory::Structural,
            summary: "Splits a large class into abstraction and implementation hierarchies",
            complexity: 3,
            popularity: 1,
        }
    }

    async fn run(&self, console: Arc<dyn Console>) -> Result<()> {
        let console = console.as_ref();

        let abstraction = BasicAbstraction::new(Box::new(ConcreteImplementationA));
        client_code(&abstraction, console);
        console.blank_line();

        let abstraction = ExtendedAbstraction::new(Box::new(ConcreteImplementationB));
        client_code(&abstraction, console);
        console.blank_line();

        devices_client_code(console);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::BufferConsole;

    #[test]
    fn test_abstractions_delegate_to_implementation() {
        let basic = BasicAbstraction::new(Box::new(ConcreteImplementationA));
        assert_eq!(
            basic.operation(),
            "Abstraction: Base operation with:\nConcreteImplementationA: Here's the result on the platform A."
        );

        let extended = ExtendedAbstraction::new(Box::new(ConcreteImplementationA));
        assert!(extended.operation().starts_with("ExtendedAbstraction"));
    }

    #[test]
    fn test_toggle_power_flips_state() {
        let mut remote = RemoteControl::new(Box::new(Tv::new()));
        assert!(!remote.device().is_enabled());
        remote.toggle_power();
        assert!(remote.device().is_enabled());
        remote.toggle_power();
        assert!(!remote.device().is_enabled());
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut remote = RemoteControl::new(Box::new(Radio::new()));
        for _ in 0..20 {
            remote.volume_up();
        }
        assert_eq!(remote.device().volume(), MAX_VOLUME);
        for _ in 0..20 {
            remote.volume_down();
        }
        assert_eq!(remote.device().volume(), 0);
    }

    #[test]
    fn test_channel_never_drops_below_minimum() {
        let mut remote = RemoteControl::new(Box::new(Tv::new()));
        remote.channel_down();
        assert_eq!(remote.device().channel(), MIN_CHANNEL);
        remote.channel_up();
        assert_eq!(remote.device().channel(), 2);
    }

    #[test]
    fn test_advanced_remote_mutes() {
        let mut remote = AdvancedRemoteControl::new(Box::new(Tv::new()));
        remote.volume_up();
        remote.mute();
        assert_eq!(remote.device().volume(), 0);
    }

    #[test]
    fn test_devices_client_code_output() {
        let console = BufferConsole::new();
        devices_client_code(&console);
        assert_eq!(
            console.lines(),
            vec![
                "TV is enabled, volume 40%, channel 2",
                "Radio is enabled, volume 30%, station 2",
                "Radio is enabled, volume 0%, station 2",
            ]
        );
    }
}
