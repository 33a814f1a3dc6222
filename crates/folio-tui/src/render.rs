//! Frame composition. Surfaces stack gallery, admin, terminal from bottom to top.

use ratatui::Frame;

use crate::features::{admin, gallery, session};
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    gallery::render::render(&app.gallery, &app.palette, frame, area);

    if let Some(admin_state) = &app.admin {
        admin::render::render(
            admin_state,
            &app.gallery.projects,
            &app.gallery.theme,
            &app.palette,
            frame,
            area,
        );
    }

    if app.session.open {
        session::render::render(
            &app.session,
            app.gallery.theme.prompt(),
            &app.palette,
            frame,
            area,
        );
    }
}
