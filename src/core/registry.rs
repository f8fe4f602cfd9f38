use crate::domain::model::{DemoInfo, PatternCategory};
use crate::domain::ports::Demo;
use crate::patterns::behavioral::{
    chain_of_responsibility::ChainOfResponsibilityDemo, command::CommandDemo,
    iterator::IteratorDemo, mediator::MediatorDemo,
};
use crate::patterns::creational::{
    abstract_factory::AbstractFactoryDemo, builder::BuilderDemo,
    factory_method::FactoryMethodDemo, prototype::PrototypeDemo,
};
use crate::patterns::structural::{
    adapter::AdapterDemo, bridge::BridgeDemo, composite::CompositeDemo,
    decorator::DecoratorDemo, flyweight::FlyweightDemo, proxy::ProxyDemo,
};
use crate::patterns::DemoSettings;
use crate::utils::error::{CatalogError, Result};

/// Every demo the catalog knows about, in presentation order.
pub struct DemoRegistry {
    demos: Vec<Box<dyn Demo>>,
}

impl DemoRegistry {
    pub fn new(settings: &DemoSettings) -> Self {
        let demos: Vec<Box<dyn Demo>> = vec![
            Box::new(AbstractFactoryDemo),
            Box::new(BuilderDemo),
            Box::new(FactoryMethodDemo::new(settings.platform)),
            Box::new(PrototypeDemo),
            Box::new(AdapterDemo),
            Box::new(BridgeDemo),
            Box::new(CompositeDemo),
            Box::new(DecoratorDemo::new(settings.channels.clone())),
            Box::new(FlyweightDemo),
            Box::new(ProxyDemo::new(settings.proxy_latency)),
            Box::new(ChainOfResponsibilityDemo::new(
                settings.blacklisted_ips.clone(),
            )),
            Box::new(CommandDemo),
            Box::new(IteratorDemo::new(settings.network)),
            Box::new(MediatorDemo),
        ];
        Self::with_demos(demos)
    }

    pub fn with_demos(demos: Vec<Box<dyn Demo>>) -> Self {
        Self { demos }
    }

    pub fn len(&self) -> usize {
        self.demos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }

    pub fn infos(&self) -> Vec<DemoInfo> {
        self.demos.iter().map(|demo| demo.info()).collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.demos.iter().map(|demo| demo.info().name).collect()
    }

    /// Looks a demo up by slug. `Abstract_Factory` and `abstract factory`
    /// both resolve to `abstract-factory`.
    pub fn get(&self, name: &str) -> Result<&dyn Demo> {
        let wanted = normalize_name(name);
        self.demos
            .iter()
            .find(|demo| demo.info().name == wanted)
            .map(|demo| demo.as_ref())
            .ok_or_else(|| CatalogError::UnknownPattern {
                name: name.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            })
    }

    pub fn by_category(&self, category: PatternCategory) -> Vec<&dyn Demo> {
        self.demos
            .iter()
            .filter(|demo| demo.info().category == category)
            .map(|demo| demo.as_ref())
            .collect()
    }

    /// Resolves the demos a run should execute. No names means every demo;
    /// a category narrows either selection.
    pub fn select(
        &self,
        names: &[String],
        category: Option<PatternCategory>,
    ) -> Result<Vec<&dyn Demo>> {
        let selected: Vec<&dyn Demo> = if names.is_empty() {
            self.demos.iter().map(|demo| demo.as_ref()).collect()
        } else {
            names
                .iter()
                .map(|name| self.get(name))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(match category {
            Some(category) => selected
                .into_iter()
                .filter(|demo| demo.info().category == category)
                .collect(),
            None => selected,
        })
    }
}

impl Default for DemoRegistry {
    fn default() -> Self {
        Self::new(&DemoSettings::default())
    }
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .replace(['_', ' '], "-")
}
