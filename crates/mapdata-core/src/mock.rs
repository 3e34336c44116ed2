//! Test doubles for the collaborator traits.
//!
//! Recorders share their logs through `Rc<RefCell<..>>` so a test can keep
//! a handle after moving the double into a chain or pipeline.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::beatmap::{Beatmap, Mods};
use crate::broadcast::NewMapListener;
use crate::error::{Error, Result};
use crate::locator::MapLocator;
use crate::pattern::{OutputPattern, PatternFormatter};
use crate::saver::Saver;
use crate::search::{SearchArgs, SearchResult};
use crate::status::{OsuStatus, StatusMask};
use crate::tokens::{TokenProvider, Tokens};

/// Build a pattern bound to an empty token set.
pub fn pattern(
    name: &str,
    template: &str,
    save_event: StatusMask,
    is_memory_format: bool,
) -> OutputPattern {
    OutputPattern::new(
        name,
        template,
        save_event,
        is_memory_format,
        Arc::new(Tokens::new()),
    )
}

pub type CallLog = Rc<RefCell<Vec<String>>>;

#[derive(Debug, Clone)]
enum Behavior {
    Nothing,
    Empty,
    Find(i32),
    Fail(String),
}

/// Configurable locator that records each invocation.
pub struct MockLocator {
    name: String,
    priority: i32,
    search_modes: StatusMask,
    behavior: Behavior,
    mods: Option<Mods>,
    calls: CallLog,
}

impl MockLocator {
    /// Locator eligible for every status that produces no result.
    pub fn new(name: &str, priority: i32) -> Self {
        Self {
            name: name.to_string(),
            priority,
            search_modes: StatusMask::ALL,
            behavior: Behavior::Nothing,
            mods: None,
            calls: CallLog::default(),
        }
    }

    pub fn with_modes(mut self, search_modes: StatusMask) -> Self {
        self.search_modes = search_modes;
        self
    }

    /// Find a single beatmap with `map_id`.
    pub fn finding(mut self, map_id: i32) -> Self {
        self.behavior = Behavior::Find(map_id);
        self
    }

    /// Attach `mods` to whatever result this locator produces.
    pub fn with_result_mods(mut self, mods: Mods) -> Self {
        self.mods = Some(mods);
        self
    }

    /// Return a "not found" result that carries `mods`.
    pub fn returning_mods(mut self, mods: Mods) -> Self {
        self.behavior = Behavior::Empty;
        self.mods = Some(mods);
        self
    }

    /// Return a "not found" result without mods.
    pub fn returning_empty(mut self) -> Self {
        self.behavior = Behavior::Empty;
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.behavior = Behavior::Fail(message.to_string());
        self
    }

    /// Record invocations into a log shared with other locators.
    pub fn with_call_log(mut self, calls: &CallLog) -> Self {
        self.calls = Rc::clone(calls);
        self
    }

    pub fn calls(&self) -> CallLog {
        Rc::clone(&self.calls)
    }
}

impl MapLocator for MockLocator {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn search_modes(&self) -> StatusMask {
        self.search_modes
    }

    fn locate(&self, args: &SearchArgs) -> Result<Option<SearchResult>> {
        self.calls.borrow_mut().push(self.name.clone());

        let result = match &self.behavior {
            Behavior::Nothing => return Ok(None),
            Behavior::Empty => SearchResult::not_found(args),
            Behavior::Find(map_id) => SearchResult::found(args, vec![Beatmap::new(*map_id)]),
            Behavior::Fail(message) => {
                return Err(Error::LocatorFailed {
                    locator: self.name.clone(),
                    message: message.clone(),
                });
            }
        };
        Ok(Some(SearchResult {
            mods: self.mods,
            ..result
        }))
    }
}

/// Saver that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSaver {
    saved: Rc<RefCell<Vec<(String, String)>>>,
    fail: bool,
}

impl RecordingSaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saver whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `(destination, text)` pairs in call order.
    pub fn saved(&self) -> Vec<(String, String)> {
        self.saved.borrow().clone()
    }
}

impl Saver for RecordingSaver {
    fn save(&self, destination: &str, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::SaveFailed {
                destination: destination.to_string(),
                source: std::io::Error::other("mock save failure"),
            });
        }
        self.saved
            .borrow_mut()
            .push((destination.to_string(), text.to_string()));
        Ok(())
    }
}

/// What a listener saw when notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedMap {
    pub listener: String,
    pub found: bool,
    pub map_id: Option<i32>,
    pub mods: Option<Mods>,
    pub action: OsuStatus,
    pub patterns: Vec<String>,
}

pub type ObservedLog = Rc<RefCell<Vec<ObservedMap>>>;

/// Listener that records each notification.
pub struct RecordingListener {
    name: String,
    log: ObservedLog,
}

impl RecordingListener {
    pub fn shared_log() -> ObservedLog {
        ObservedLog::default()
    }

    pub fn with_log(name: &str, log: &ObservedLog) -> Self {
        Self {
            name: name.to_string(),
            log: Rc::clone(log),
        }
    }
}

impl NewMapListener for RecordingListener {
    fn on_new_map(&self, result: &SearchResult) {
        self.log.borrow_mut().push(ObservedMap {
            listener: self.name.clone(),
            found: result.found_beatmaps,
            map_id: result.primary().map(|b| b.map_id),
            mods: result.mods,
            action: result.action,
            patterns: result
                .formatted_strings
                .iter()
                .map(|p| p.name.clone())
                .collect(),
        });
    }
}

/// Formatter producing fixed pattern names.
///
/// Each pattern's template is `!<name>!`, saved on every status.
pub struct StaticFormatter {
    names: Vec<String>,
    save_event: StatusMask,
    memory: bool,
    fail: bool,
}

impl StaticFormatter {
    pub fn named(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            save_event: StatusMask::ALL,
            memory: false,
            fail: false,
        }
    }

    pub fn with_save_event(mut self, save_event: StatusMask) -> Self {
        self.save_event = save_event;
        self
    }

    pub fn memory_only(mut self) -> Self {
        self.memory = true;
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::named(&[])
        }
    }
}

impl PatternFormatter for StaticFormatter {
    fn format(&self, tokens: &Tokens, _status: OsuStatus) -> Result<Vec<OutputPattern>> {
        if self.fail {
            return Err(Error::FormatterFailed("mock formatter failure".to_string()));
        }
        let tokens = Arc::new(tokens.clone());
        Ok(self
            .names
            .iter()
            .map(|name| {
                OutputPattern::new(
                    name.as_str(),
                    format!("!{}!", name),
                    self.save_event,
                    self.memory,
                    Arc::clone(&tokens),
                )
            })
            .collect())
    }
}

/// Token provider writing fixed entries.
pub struct StaticTokenProvider {
    entries: Vec<(String, String)>,
}

impl StaticTokenProvider {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn contribute(&self, tokens: &mut Tokens, _result: &SearchResult) -> Result<()> {
        for (name, value) in &self.entries {
            tokens.set(name.as_str(), value.as_str());
        }
        Ok(())
    }
}

/// Token provider that always fails.
pub struct FailingTokenProvider;

impl TokenProvider for FailingTokenProvider {
    fn contribute(&self, _tokens: &mut Tokens, _result: &SearchResult) -> Result<()> {
        Err(Error::TokenProviderFailed(
            "mock token provider failure".to_string(),
        ))
    }
}
