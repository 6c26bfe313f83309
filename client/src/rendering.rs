use crate::game::ClientState;
use macroquad::prelude::Conf;
use shared::render::Surface;
use shared::Settings;

pub struct Renderer {
    width: f32,
    height: f32,
}

impl Renderer {
    pub fn new(settings: &Settings) -> Self {
        Renderer {
            width: settings.screen_width,
            height: settings.screen_height,
        }
    }

    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: "TPG Client".to_owned(),
            window_width: self.width as i32,
            window_height: self.height as i32,
            window_resizable: false,
            ..Default::default()
        }
    }

    /// The client window only shows the phase background.
    pub fn render(&self, state: &ClientState, surface: &mut dyn Surface) {
        surface.fill(state.background());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::render::{DrawCall, RecordingSurface};
    use shared::Phase;

    #[test]
    fn test_render_fills_phase_background() {
        let renderer = Renderer::new(&Settings::default());
        let mut state = ClientState::new();
        let mut surface = RecordingSurface::default();

        renderer.render(&state, &mut surface);
        state.set_phase(Phase::Win);
        renderer.render(&state, &mut surface);

        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Fill(Phase::Ready.background()),
                DrawCall::Fill(Phase::Win.background()),
            ]
        );
    }

    #[test]
    fn test_window_conf_uses_screen_size() {
        let settings = Settings::default().with_screen(Some(800.0), None);
        let conf = Renderer::new(&settings).window_conf();
        assert_eq!(conf.window_title, "TPG Client");
        assert_eq!(conf.window_width, 800);
        assert_eq!(conf.window_height, 480);
    }
}
