use crate::frame::{Frame, Rgb};

const BACKGROUND: Rgb = Rgb::new(0x02, 0x06, 0x17);
const SKY_TOP: Rgb = Rgb::new(0x1d, 0x4e, 0xd8);
const SKY_HORIZON: Rgb = Rgb::new(0x0f, 0x17, 0x2a);
const GROUND_HORIZON: Rgb = Rgb::new(0x11, 0x18, 0x27);
const GROUND_BOTTOM: Rgb = Rgb::new(0x02, 0x06, 0x17);

const GUN_BODY: Rgb = Rgb::new(0x11, 0x18, 0x27);
const GUN_PANEL: Rgb = Rgb::new(0x1f, 0x29, 0x37);
const FLASH: Rgb = Rgb::new(248, 250, 252);
const CROSSHAIR: Rgb = Rgb::new(229, 231, 235);
const CROSSHAIR_ARM: f32 = 8.0;

/// Clear to the background, then paint the sky and ground gradients.
pub fn draw_backdrop(frame: &mut Frame) {
    let half = frame.height() / 2;
    frame.clear(BACKGROUND);
    frame.vertical_gradient(0, half, SKY_TOP, SKY_HORIZON);
    frame.vertical_gradient(half, frame.height(), GROUND_HORIZON, GROUND_BOTTOM);
}

/// The gun block at the bottom center, with a muzzle flash on firing frames.
pub fn draw_weapon(frame: &mut Frame, muzzle_flash: bool) {
    let (w, h) = (frame.width() as f32, frame.height() as f32);
    let gun_w = w * 0.22;
    let gun_h = h * 0.35;
    let gun_x = w / 2.0 - gun_w / 2.0;
    let gun_y = h - gun_h + 10.0;

    frame.fill_rect(gun_x, gun_y, gun_w, gun_h, GUN_BODY);
    frame.fill_rect(
        gun_x + gun_w * 0.1,
        gun_y + gun_h * 0.15,
        gun_w * 0.8,
        gun_h * 0.5,
        GUN_PANEL,
    );
    if muzzle_flash {
        frame.fill_circle(w / 2.0, h - 40.0, 10.0, FLASH, 0.9);
    }
}

pub fn draw_crosshair(frame: &mut Frame) {
    let cx = (frame.width() / 2) as f32;
    let cy = (frame.height() / 2) as f32;
    frame.line(cx - CROSSHAIR_ARM, cy, cx + CROSSHAIR_ARM, cy, CROSSHAIR, 0.8);
    frame.line(cx, cy - CROSSHAIR_ARM, cx, cy + CROSSHAIR_ARM, CROSSHAIR, 0.8);
}
