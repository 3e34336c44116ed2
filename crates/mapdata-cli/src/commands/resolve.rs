//! Resolve command: find a beatmap and run the full pattern pipeline.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use mapdata_core::{
    CatalogLocator, Config, ConsoleListener, FileSaver, MapDataGetter, MapLocator,
    MapTokenProvider, Mods, OsuStatus, SearchArgs, SearchResult, StatusMask, TemplateFormatter,
};
use serde_json::{Value as JsonValue, json};
use tracing::info;

/// Priority of the catalog; the mods probe always runs before it.
const CATALOG_PRIORITY: i32 = 0;
const MODS_PROBE_PRIORITY: i32 = 100;

pub struct ResolveRequest {
    pub catalog: Option<PathBuf>,
    pub status: String,
    pub map_id: Option<i32>,
    pub artist: String,
    pub title: String,
    pub diff: String,
    pub mods: Option<u32>,
}

impl ResolveRequest {
    fn search_args(&self) -> Result<SearchArgs> {
        let status = OsuStatus::parse(&self.status)?;
        let mut args = SearchArgs::new(status)
            .with_artist(self.artist.as_str())
            .with_title(self.title.as_str())
            .with_diff_name(self.diff.as_str());
        if let Some(map_id) = self.map_id {
            args = args.with_map_id(map_id);
        }
        Ok(args)
    }
}

/// Reports the mods the game already knows about without finding a map,
/// so a later locator's hit inherits them.
pub struct ModsProbe {
    mods: Mods,
}

impl ModsProbe {
    pub fn new(mods: Mods) -> Self {
        Self { mods }
    }
}

impl MapLocator for ModsProbe {
    fn name(&self) -> &str {
        "mods probe"
    }

    fn priority(&self) -> i32 {
        MODS_PROBE_PRIORITY
    }

    fn search_modes(&self) -> StatusMask {
        StatusMask::ALL
    }

    fn locate(&self, args: &SearchArgs) -> mapdata_core::Result<Option<SearchResult>> {
        Ok(Some(SearchResult::not_found(args).with_mods(self.mods)))
    }
}

pub fn build_getter(
    config: Config,
    catalog: CatalogLocator,
    mods: Option<Mods>,
    console: bool,
) -> Result<MapDataGetter> {
    let formatter = TemplateFormatter::new(config.patterns.clone())?;
    let mut builder = MapDataGetter::builder(FileSaver::new(&config.output_dir))
        .locator(catalog.with_priority(CATALOG_PRIORITY))
        .static_token("mapdataVersion", env!("CARGO_PKG_VERSION"))
        .token_provider(MapTokenProvider)
        .formatter(formatter)
        .settings(config);

    if let Some(mods) = mods {
        builder = builder.locator(ModsProbe::new(mods));
    }
    if console {
        builder = builder.listener(ConsoleListener);
    }
    Ok(builder.build())
}

pub fn result_to_json(result: &SearchResult) -> JsonValue {
    let patterns: Vec<JsonValue> = result
        .formatted_strings
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "text": p.formatted(),
                "memory": p.is_memory_format,
                "saveEvent": p.save_event.to_string(),
            })
        })
        .collect();

    json!({
        "found": result.found_beatmaps,
        "status": result.action.as_str(),
        "mods": result.mods.map(|m| m.short_name()),
        "beatmaps": result.beatmaps_found,
        "patterns": patterns,
    })
}

pub fn run(config: Config, request: ResolveRequest, json_output: bool) -> Result<()> {
    let catalog_path = match request.catalog.as_ref().or(config.catalog.as_ref()) {
        Some(path) => path.clone(),
        None => bail!("No beatmap catalog given (use --catalog or set `catalog` in the config)"),
    };
    let catalog = CatalogLocator::from_json_file("catalog", &catalog_path)
        .with_context(|| format!("Failed to load catalog {:?}", catalog_path))?;
    info!("Loaded {} beatmap(s) from {:?}", catalog.len(), catalog_path);

    let args = request.search_args()?;
    let getter = build_getter(config, catalog, request.mods.map(Mods::from_bits), !json_output)?;
    let result = getter.resolve(&args)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result_to_json(&result))?);
    }
    Ok(())
}
