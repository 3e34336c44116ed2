//! Map result pipeline.
//!
//! [`MapDataGetter`] ties the collaborators together:
//!
//! 1. `find_map_data` runs the locator chain (never fails)
//! 2. `process_map_result` builds tokens, formats patterns, optionally
//!    persists them and finally notifies every new-map listener
//!
//! Errors from token providers, formatters and the saver abort the pass.
//! Unlike a locator failure there is nothing to fall back to once a map has
//! been found.

use tracing::{debug, info};

use crate::broadcast::{MapBroadcaster, NewMapListener};
use crate::config::{MemorySettings, SettingsStore, setting_names};
use crate::error::Result;
use crate::locator::{LocatorChain, MapLocator};
use crate::pattern::{FormatterRegistry, PatternFormatter};
use crate::saver::{Saver, save_map_strings};
use crate::search::{SearchArgs, SearchResult};
use crate::tokens::{TokenProvider, Tokens};

pub struct MapDataGetter {
    chain: LocatorChain,
    static_tokens: Tokens,
    token_providers: Vec<Box<dyn TokenProvider>>,
    formatters: FormatterRegistry,
    saver: Box<dyn Saver>,
    settings: Box<dyn SettingsStore>,
    broadcaster: MapBroadcaster,
}

impl MapDataGetter {
    pub fn builder(saver: impl Saver + 'static) -> MapDataGetterBuilder {
        MapDataGetterBuilder::new(saver)
    }

    pub fn find_map_data(&self, args: &SearchArgs) -> SearchResult {
        self.chain.find_map_data(args)
    }

    /// Run tokens, formatting, persistence and broadcast for `result`.
    pub fn process_map_result(&self, result: &mut SearchResult) -> Result<()> {
        let tokens = self.create_tokens(result)?;

        result.formatted_strings = self.formatters.format_all(&tokens, result.action)?;

        if self.settings.flag(setting_names::DISABLE_DISK_PATTERN_WRITE) {
            debug!("Disk pattern write disabled, skipping save");
        } else {
            save_map_strings(self.saver.as_ref(), &result.formatted_strings, result.action)?;
        }

        self.broadcaster.set_new_map(result);
        Ok(())
    }

    /// Find and fully process a map in one call.
    pub fn resolve(&self, args: &SearchArgs) -> Result<SearchResult> {
        let mut result = self.find_map_data(args);
        self.process_map_result(&mut result)?;
        info!(
            "Processed {} map ({} pattern(s))",
            if result.found_beatmaps { "found" } else { "missing" },
            result.formatted_strings.len()
        );
        Ok(result)
    }

    /// Fresh token map: static tokens first, then each provider in order.
    pub fn create_tokens(&self, result: &SearchResult) -> Result<Tokens> {
        let mut tokens = self.static_tokens.clone();
        for provider in &self.token_providers {
            provider.contribute(&mut tokens, result)?;
        }
        Ok(tokens)
    }
}

pub struct MapDataGetterBuilder {
    locators: Vec<Box<dyn MapLocator>>,
    static_tokens: Tokens,
    token_providers: Vec<Box<dyn TokenProvider>>,
    formatters: FormatterRegistry,
    saver: Box<dyn Saver>,
    settings: Box<dyn SettingsStore>,
    broadcaster: MapBroadcaster,
}

impl MapDataGetterBuilder {
    /// Builder with no collaborators and default (all false) settings.
    pub fn new(saver: impl Saver + 'static) -> Self {
        Self {
            locators: Vec::new(),
            static_tokens: Tokens::new(),
            token_providers: Vec::new(),
            formatters: FormatterRegistry::new(),
            saver: Box::new(saver),
            settings: Box::new(MemorySettings::new()),
            broadcaster: MapBroadcaster::new(),
        }
    }

    pub fn locator(mut self, locator: impl MapLocator + 'static) -> Self {
        self.locators.push(Box::new(locator));
        self
    }

    pub fn static_token(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.static_tokens.set(name, value);
        self
    }

    pub fn static_tokens(mut self, tokens: &Tokens) -> Self {
        self.static_tokens.extend_from(tokens);
        self
    }

    pub fn token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.token_providers.push(Box::new(provider));
        self
    }

    pub fn formatter(mut self, formatter: impl PatternFormatter + 'static) -> Self {
        self.formatters.register(Box::new(formatter));
        self
    }

    pub fn settings(mut self, settings: impl SettingsStore + 'static) -> Self {
        self.settings = Box::new(settings);
        self
    }

    pub fn listener(mut self, listener: impl NewMapListener + 'static) -> Self {
        self.broadcaster.register(Box::new(listener));
        self
    }

    pub fn build(self) -> MapDataGetter {
        MapDataGetter {
            chain: LocatorChain::new(self.locators),
            static_tokens: self.static_tokens,
            token_providers: self.token_providers,
            formatters: self.formatters,
            saver: self.saver,
            settings: self.settings,
            broadcaster: self.broadcaster,
        }
    }
}
