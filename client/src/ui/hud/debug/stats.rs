use crate::world::SplashVisuals;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use shared::water::WaterSimulation;
use shared::MAX_RIPPLES;

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct RipplesText;

#[derive(Component)]
pub struct ParticlesText;

#[derive(Component)]
pub struct SimTimeText;

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut TextSpan, With<FpsText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());
    for mut span in &mut query {
        **span = match fps {
            Some(value) => format!("{value:.0}"),
            None => "N/A".to_string(),
        };
    }
}

pub fn water_stats_update_system(
    ripples_query: Query<Entity, With<RipplesText>>,
    particles_query: Query<Entity, With<ParticlesText>>,
    time_query: Query<Entity, With<SimTimeText>>,
    mut writer: TextUiWriter,
    simulation: Res<WaterSimulation>,
    visuals: Res<SplashVisuals>,
) {
    for entity in ripples_query.iter() {
        *writer.text(entity, 0) = format!(
            "Ripples: {}/{}",
            simulation.ripples().active_count(),
            MAX_RIPPLES
        );
    }
    for entity in particles_query.iter() {
        *writer.text(entity, 0) = format!(
            "Droplets: {} ({} entities)",
            simulation.splashes().len(),
            visuals.len()
        );
    }
    for entity in time_query.iter() {
        let clock = simulation.clock();
        *writer.text(entity, 0) = format!(
            "Time: {:.2}s, frame {}, dt {:.1}ms ({:?})",
            clock.elapsed(),
            clock.frame(),
            clock.last_dt() * 1000.0,
            clock.mode()
        );
    }
}
