use grid_form::ColorVariant;
use ratatui::style::{Color, Modifier, Style};

/// Semantic roles used by the form view, independent of the active variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Text,
    SubtleText,
    Accent,
    Selection,
    Border,
    Required,
}

#[derive(Debug, Clone)]
pub struct RoleColors {
    pub text: Color,
    pub subtle_text: Color,
    pub accent: Color,
    pub selection: Color,
    pub border: Color,
    pub required: Color,
}

impl RoleColors {
    pub fn color(&self, role: Role) -> Color {
        match role {
            Role::Text => self.text,
            Role::SubtleText => self.subtle_text,
            Role::Accent => self.accent,
            Role::Selection => self.selection,
            Role::Border => self.border,
            Role::Required => self.required,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub roles: RoleColors,
}

impl Theme {
    /// Terminal counterpart of the `gf-variant-*` classes.
    pub fn for_variant(variant: ColorVariant) -> Self {
        let accent = match variant {
            ColorVariant::Primary => Color::Rgb(0x3b, 0x6f, 0xd8),
            ColorVariant::Secondary => Color::Rgb(0x6c, 0x5b, 0xb8),
        };
        Self {
            roles: RoleColors {
                text: Color::Rgb(0xe6, 0xe6, 0xe6),
                subtle_text: Color::Rgb(0x8a, 0x8f, 0x98),
                accent,
                selection: Color::Rgb(0x24, 0x32, 0x4a),
                border: Color::Rgb(0x56, 0x56, 0x56),
                required: accent,
            },
        }
    }

    pub fn style(&self, role: Role) -> Style {
        let style = Style::default().fg(self.roles.color(role));
        match role {
            Role::Selection => Style::default().bg(self.roles.selection),
            Role::Accent => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_differ_only_in_accent() {
        let a = Theme::for_variant(ColorVariant::Primary);
        let b = Theme::for_variant(ColorVariant::Secondary);
        assert_ne!(a.roles.accent, b.roles.accent);
        assert_eq!(a.roles.text, b.roles.text);
        assert_eq!(a.style(Role::Selection).bg, Some(a.roles.selection));
    }
}
