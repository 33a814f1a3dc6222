use crossterm::event::{KeyCode, KeyEvent};

use super::state::GalleryState;
use crate::effects::UiEffect;

pub fn handle_key(gallery: &mut GalleryState, key: KeyEvent) -> Vec<UiEffect> {
    let count = gallery.visible().len();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            gallery.selected = gallery.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if gallery.selected + 1 < count {
                gallery.selected += 1;
            }
        }
        KeyCode::Home => gallery.selected = 0,
        KeyCode::End => gallery.selected = count.saturating_sub(1),
        KeyCode::Enter if count > 0 => gallery.detail_open = !gallery.detail_open,
        KeyCode::Esc => gallery.detail_open = false,
        KeyCode::Char('o') => {
            if let Some(url) = gallery.selected_project().and_then(|p| p.primary_url()) {
                return vec![UiEffect::OpenBrowser {
                    url: url.to_string(),
                }];
            }
        }
        _ => {}
    }
    vec![]
}
