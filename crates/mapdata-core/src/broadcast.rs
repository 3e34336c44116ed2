//! New-map fan-out.

use owo_colors::OwoColorize;

use crate::search::SearchResult;

/// Consumer notified once a result has been fully processed.
///
/// The same result is shared by every listener.
pub trait NewMapListener {
    fn on_new_map(&self, result: &SearchResult);
}

#[derive(Default)]
pub struct MapBroadcaster {
    listeners: Vec<Box<dyn NewMapListener>>,
}

impl MapBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Box<dyn NewMapListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Notify every listener in registration order.
    pub fn set_new_map(&self, result: &SearchResult) {
        for listener in &self.listeners {
            listener.on_new_map(result);
        }
    }
}

/// Format a result as a single coloured console line.
pub fn format_result_console(result: &SearchResult) -> String {
    let status = result.action.as_str();
    let mods = result
        .mods
        .map(|m| format!(" +{}", m.short_name()))
        .unwrap_or_default();

    match result.primary().filter(|_| result.found_beatmaps) {
        Some(map) => format!(
            "[{}] {} ({}){} - {} pattern(s)",
            status.cyan(),
            map.display_name().bold(),
            map.map_id.dimmed(),
            mods.yellow(),
            result.formatted_strings.len()
        ),
        None => format!(
            "[{}] {}{}",
            status.cyan(),
            "no map found".red(),
            mods.yellow()
        ),
    }
}

/// Prints each new map to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleListener;

impl NewMapListener for ConsoleListener {
    fn on_new_map(&self, result: &SearchResult) {
        println!("{}", format_result_console(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beatmap::{Beatmap, Mods};
    use crate::mock::RecordingListener;
    use crate::search::SearchArgs;
    use crate::status::OsuStatus;

    #[test]
    fn test_listeners_called_in_order() {
        let log = RecordingListener::shared_log();
        let mut broadcaster = MapBroadcaster::new();
        broadcaster.register(Box::new(RecordingListener::with_log("first", &log)));
        broadcaster.register(Box::new(RecordingListener::with_log("second", &log)));

        let args = SearchArgs::new(OsuStatus::Playing);
        broadcaster.set_new_map(&SearchResult::found(&args, vec![Beatmap::new(5)]));

        let calls = log.borrow();
        let seen: Vec<_> = calls
            .iter()
            .map(|o| (o.listener.as_str(), o.map_id))
            .collect();
        assert_eq!(seen, vec![("first", Some(5)), ("second", Some(5))]);
    }

    #[test]
    fn test_console_format_found() {
        let map = Beatmap {
            artist: "a".to_string(),
            title: "t".to_string(),
            diff_name: "d".to_string(),
            ..Beatmap::new(9)
        };
        let args = SearchArgs::new(OsuStatus::Playing);
        let result = SearchResult::found(&args, vec![map]).with_mods(Mods::from_bits(8));

        let line = format_result_console(&result);
        assert!(line.contains("a - t [d]"));
        assert!(line.contains("+HD"));
        assert!(line.contains("Playing"));
    }

    #[test]
    fn test_console_format_not_found() {
        let result = SearchResult::not_found(&SearchArgs::new(OsuStatus::Null));
        let line = format_result_console(&result);
        assert!(line.contains("no map found"));
    }
}
