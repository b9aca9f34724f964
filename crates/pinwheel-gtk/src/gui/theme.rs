use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use pinwheel::Theme;

pub struct ThemeColors {
    pub default: Srgba<f64>,
    pub alternate: Srgba<f64>,
    pub selected: Srgba<f64>,
    pub cancel: Srgba<f64>,
    pub label: Srgba<f64>,
}

impl ThemeColors {
    /// Sector colors come from the config, the rest from the GTK theme.
    pub fn from_context(context: &gtk::StyleContext, theme: &Theme) -> Self {
        Self {
            default: theme.default_color.0,
            selected: theme.selected_color.0,
            alternate: Self::lookup_color(
                context,
                "theme_unfocused_bg_color",
                Srgba::new(0.4, 0.4, 0.4, 0.5),
                Some(0.5),
            ),
            cancel: Self::lookup_color(
                context,
                "error_bg_color",
                Srgba::new(0.8, 0.2, 0.2, 0.35),
                Some(0.35),
            ),
            label: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.pinwheel-window, .pinwheel-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
