use bevy::prelude::*;

use town::camera::Viewport;
use town::catalog::Catalogs;
use town::town::Town;
use town::TownSet;

use crate::restore::restore_town;
use crate::save_error::SaveError;
use crate::serialization::SaveData;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Text produced by the most recent save. Writing it somewhere is up to the
/// host application.
#[derive(Resource, Default, Debug)]
pub struct LastSave(pub Option<String>);

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Event, Debug, Clone)]
pub struct SaveTownEvent;

/// Replaces the current town with the one encoded in `text`.
#[derive(Event, Debug, Clone)]
pub struct LoadTownEvent {
    pub text: String,
}

/// A load was refused; the current town is left untouched.
#[derive(Event, Debug, Clone)]
pub struct LoadFailedEvent {
    pub error: SaveError,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveTownEvent>()
            .add_event::<LoadTownEvent>()
            .add_event::<LoadFailedEvent>()
            .init_resource::<LastSave>();

        // Loads run first so a save queued in the same tick sees the result.
        app.add_systems(
            FixedUpdate,
            (handle_load_events, handle_save_events)
                .chain()
                .in_set(TownSet::PostCommands),
        );
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

fn handle_save_events(
    mut events: EventReader<SaveTownEvent>,
    town: Res<Town>,
    viewport: Res<Viewport>,
    catalogs: Res<Catalogs>,
    mut last: ResMut<LastSave>,
) {
    if events.read().next().is_none() {
        return;
    }
    // Drain remaining events (one save per tick).
    events.read().for_each(drop);

    let save = SaveData::capture(&town, &viewport, &catalogs);
    info!(
        "Saved town '{}': {} buildings, {} roads",
        save.world_name,
        save.buildings.len(),
        save.roads.len()
    );
    last.0 = Some(save.encode());
}

fn handle_load_events(
    mut events: EventReader<LoadTownEvent>,
    mut town: ResMut<Town>,
    mut viewport: ResMut<Viewport>,
    catalogs: Res<Catalogs>,
    mut failed: EventWriter<LoadFailedEvent>,
) {
    // Only the latest request matters.
    let Some(event) = events.read().last() else {
        return;
    };
    match load(&event.text, &catalogs) {
        Ok((restored, save)) => {
            *town = restored;
            save.camera.apply(&mut viewport);
        }
        Err(error) => {
            warn!("Load failed: {error}");
            failed.send(LoadFailedEvent { error });
        }
    }
}

fn load(text: &str, catalogs: &Catalogs) -> Result<(Town, SaveData), SaveError> {
    if text.trim().is_empty() {
        return Err(SaveError::NoData);
    }
    let save = SaveData::decode(text)?;
    let town = restore_town(&save, catalogs)?;
    Ok((town, save))
}
