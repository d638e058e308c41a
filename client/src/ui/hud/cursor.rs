use bevy::{
    prelude::*,
    window::{CursorGrabMode, PrimaryWindow},
};
use shared::messages::{CursorMode, PresentationEvent};

/// Last cursor presentation requested by the movement core.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorPresentation {
    pub mode: CursorMode,
    pub swim_pointer_visible: bool,
    /// Clamped pointer position in window coordinates, once one was reported.
    pub swim_pointer_position: Option<Vec2>,
}

impl CursorPresentation {
    pub fn apply(&mut self, event: PresentationEvent) {
        match event {
            PresentationEvent::CursorMode(mode) => self.mode = mode,
            PresentationEvent::SwimPointerVisible(visible) => self.swim_pointer_visible = visible,
            PresentationEvent::SwimPointerMoved(position) => {
                self.swim_pointer_position = Some(position)
            }
        }
    }

    pub fn grab_mode(&self) -> CursorGrabMode {
        match self.mode {
            CursorMode::Locked => CursorGrabMode::Locked,
            CursorMode::Free => CursorGrabMode::None,
        }
    }

    /// The swim pointer replaces the OS cursor while it is shown.
    pub fn os_cursor_visible(&self) -> bool {
        self.mode == CursorMode::Free && !self.swim_pointer_visible
    }
}

pub fn apply_presentation_events_system(
    mut events: EventReader<PresentationEvent>,
    mut presentation: ResMut<CursorPresentation>,
    mut window: Query<&mut Window, With<PrimaryWindow>>,
) {
    if events.is_empty() {
        return;
    }
    for event in events.read() {
        presentation.apply(*event);
    }

    let Ok(mut window) = window.single_mut() else {
        return;
    };
    let grab_mode = presentation.grab_mode();
    let visible = presentation.os_cursor_visible();
    if window.cursor_options.grab_mode != grab_mode || window.cursor_options.visible != visible {
        debug!("Cursor grab {:?}, visible {}", grab_mode, visible);
        window.cursor_options.grab_mode = grab_mode;
        window.cursor_options.visible = visible;
    }
}
