use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

pub struct OneDark;

impl OneDark {
    /// OneDark skin with headers and bullets in the timeline color.
    pub fn timeline_skin(accent: Color) -> MadSkin {
        let mut skin = MadSkin::default();

        skin.paragraph.set_fg(OneDark::FG);
        skin.bold.set_fg(OneDark::FG);
        skin.italic.set_fg(OneDark::FG);

        skin.headers[0].set_fg(accent);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        skin.headers[1].set_fg(OneDark::YELLOW);
        skin.headers[1].add_attr(Attribute::Bold);

        skin.headers[2].set_fg(OneDark::BLUE);
        skin.headers[2].add_attr(Attribute::Bold);

        skin.table.set_fg(OneDark::PURPLE);
        skin.bullet.set_fg(accent);
        skin.quote_mark.set_char('┃');
        skin.quote_mark.set_fg(OneDark::COMMENT);

        skin.inline_code.set_fg(OneDark::GREEN);
        skin.inline_code.set_bg(OneDark::BG);
        skin.code_block.set_fg(OneDark::ORANGE);
        skin.code_block.set_bg(OneDark::BG);

        skin
    }

    pub const BG: Color = rgb(0x282C34);
    pub const FG: Color = rgb(0xABB2BF);
    pub const RED: Color = rgb(0xE06C75);
    pub const ORANGE: Color = rgb(0xD19A66);
    pub const YELLOW: Color = rgb(0xE5C07B);
    pub const GREEN: Color = rgb(0x98C379);
    pub const BLUE: Color = rgb(0x61AFEF);
    pub const PURPLE: Color = rgb(0xC678DD);
    pub const COMMENT: Color = rgb(0x5C6370);
}

/// `0xRRGGBB` to a terminal color.
const fn rgb(hex: u32) -> Color {
    Color::Rgb {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_palette_splits_into_channels() {
        assert_eq!(
            OneDark::BG,
            Color::Rgb {
                r: 0x28,
                g: 0x2C,
                b: 0x34
            }
        );
        assert_eq!(rgb(0x5588CC), Color::Rgb { r: 0x55, g: 0x88, b: 0xCC });
    }
}
