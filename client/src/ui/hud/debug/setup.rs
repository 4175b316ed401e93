use super::stats::{FpsText, ParticlesText, RipplesText, SimTimeText};
use crate::input::data::WaterAction;
use crate::input::keyboard::is_action_just_pressed;
use crate::input::KeyMap;
use bevy::prelude::*;

/// Marker to find the container entity so we can show/hide the debug HUD
#[derive(Component)]
pub struct HudRoot;

pub fn setup_debug_hud(mut commands: Commands) {
    // this is the wrapper/container for the text
    let root = commands
        .spawn((
            HudRoot,
            Visibility::Hidden,
            (
                // give it a dark background for readability
                BackgroundColor(Color::BLACK.with_alpha(0.5)),
                // displayed over all other UI
                GlobalZIndex(i32::MAX),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Percent(1.),
                    top: Val::Percent(1.),
                    bottom: Val::Auto,
                    right: Val::Auto,
                    padding: UiRect::all(Val::Px(4.0)),
                    flex_direction: FlexDirection::Column,
                    ..Default::default()
                },
            ),
        ))
        .id();
    let text_fps = commands
        .spawn((
            Text::new("FPS: "),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::WHITE),
        ))
        .with_child((
            FpsText,
            TextSpan::new("N/A"),
            TextFont::from_font_size(16.0),
            TextColor(Color::WHITE),
        ))
        .id();

    fn spawn_debug_text<T: Component>(
        commands: &mut Commands,
        marker: T,
        initial_text: &str,
    ) -> Entity {
        commands
            .spawn((
                marker,
                Text::new(initial_text),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ))
            .id()
    }

    let ripples_text = spawn_debug_text(&mut commands, RipplesText, "Ripples: N/A");
    let particles_text = spawn_debug_text(&mut commands, ParticlesText, "Droplets: N/A");
    let time_text = spawn_debug_text(&mut commands, SimTimeText, "Time: N/A");
    commands
        .entity(root)
        .add_children(&[text_fps, ripples_text, particles_text, time_text]);
}

/// Toggle the debug HUD when pressing F3
pub fn toggle_hud_system(
    mut q: Query<&mut Visibility, With<HudRoot>>,
    kbd: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
) {
    if !is_action_just_pressed(WaterAction::ToggleHud, &kbd, &key_map) {
        return;
    }
    let Ok(mut vis) = q.single_mut() else {
        return;
    };
    *vis = match *vis {
        Visibility::Hidden => Visibility::Visible,
        _ => Visibility::Hidden,
    };
}
