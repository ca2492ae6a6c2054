//! Braille-dot rendering of the play area. Each terminal cell holds a 2×4
//! dot block; game coordinates are y-up, rows are y-down.

use std::collections::HashMap;

use ratatui::prelude::*;

use invaders::consts::{ALIEN_H_WALK, BOLT_SPEED, GAME_HEIGHT, GAME_WIDTH};
use invaders::wave::{AlienKind, Bounds, Side, Sprite, Surface};

type DotMap = HashMap<(usize, usize), u8>;

const BG: Color = Color::Rgb(0, 0, 5);

pub struct BrailleCanvas {
    width: usize,
    height: usize,
    grid: Vec<Vec<(char, Style)>>,
    // dots per play-area unit
    sx: f64,
    sy: f64,
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: vec![vec![(' ', Style::default().bg(BG)); width]; height],
            sx: (width * 2) as f64 / GAME_WIDTH,
            sy: (height * 4) as f64 / GAME_HEIGHT,
        }
    }

    fn dot_w(&self) -> i32 {
        (self.width * 2) as i32
    }

    fn dot_h(&self) -> i32 {
        (self.height * 4) as i32
    }

    fn to_dots(&self, x: f64, y: f64) -> (i32, i32) {
        ((x * self.sx) as i32, ((GAME_HEIGHT - y) * self.sy) as i32)
    }

    fn set_dot(&self, map: &mut DotMap, bx: i32, by: i32) {
        if bx < 0 || by < 0 || bx >= self.dot_w() || by >= self.dot_h() {
            return;
        }
        let cell = (bx as usize / 2, by as usize / 4);
        *map.entry(cell).or_insert(0) |= braille_bit(bx as usize % 2, by as usize % 4);
    }

    fn stamp(&self, map: &mut DotMap, cx: i32, cy: i32, pixels: &[(i32, i32)]) {
        for &(dx, dy) in pixels {
            self.set_dot(map, cx + dx, cy + dy);
        }
    }

    fn write_layer(&mut self, map: &DotMap, color: Color, bold: bool) {
        for (&(cx, cy), &bits) in map {
            if cx < self.width && cy < self.height && bits != 0 {
                let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                let mut style = Style::default().fg(color).bg(BG);
                if bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                self.grid[cy][cx] = (ch, style);
            }
        }
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Surface for BrailleCanvas {
    fn sprite(&mut self, sprite: Sprite, bounds: Bounds) {
        let (cx, cy) = self.to_dots(bounds.x, bounds.y);
        let mut map = DotMap::new();
        match sprite {
            Sprite::Alien(kind) => {
                // Legs swap every march step.
                let step = (bounds.x / ALIEN_H_WALK).round() as i64;
                self.stamp(&mut map, cx, cy, alien_pixels(kind, step % 2 == 0));
                let color = match kind {
                    AlienKind::Squid => Color::Rgb(255, 80, 80),
                    AlienKind::Crab => Color::Rgb(80, 255, 150),
                    AlienKind::Octopus => Color::Rgb(200, 180, 255),
                };
                self.write_layer(&map, color, false);
            }
            Sprite::Ship { frame: 0 } => {
                self.stamp(&mut map, cx, cy, SHIP);
                self.write_layer(&map, Color::Rgb(80, 255, 80), true);
            }
            Sprite::Ship { frame } => {
                self.stamp(&mut map, cx, cy, &debris(frame));
                let color = if frame % 2 == 0 {
                    Color::Rgb(255, 200, 80)
                } else {
                    Color::Rgb(255, 100, 60)
                };
                self.write_layer(&map, color, true);
            }
        }
    }

    fn fill_rect(&mut self, bounds: Bounds, side: Side) {
        let (bx, top) = self.to_dots(bounds.x, bounds.top());
        let (_, bottom) = self.to_dots(bounds.x, bounds.bottom());
        let len = (bottom - top).max(2);
        let mut map = DotMap::new();
        match side {
            Side::Player => {
                for dy in 0..len {
                    self.set_dot(&mut map, bx, top + dy);
                }
                self.write_layer(&map, Color::Rgb(255, 255, 200), true);
            }
            Side::Alien => {
                let phase = (bounds.y / BOLT_SPEED).round() as i64 % 2 == 0;
                for dy in 0..len {
                    let dx = match dy % 4 {
                        1 => 1,
                        3 => -1,
                        _ => 0,
                    };
                    self.set_dot(&mut map, if phase { bx + dx } else { bx - dx }, top + dy);
                }
                self.write_layer(&map, Color::Rgb(255, 100, 100), true);
            }
        }
    }

    fn hline(&mut self, y: f64, x0: f64, x1: f64) {
        let (c0, row) = self.to_dots(x0, y);
        let (c1, _) = self.to_dots(x1, y);
        let row = (row / 4) as usize;
        if row >= self.height {
            return;
        }
        let style = Style::default().fg(Color::Rgb(40, 80, 40)).bg(BG);
        let first = (c0.max(0) / 2) as usize;
        let last = ((c1.max(0) / 2) as usize).min(self.width);
        for col in first..last {
            if self.grid[row][col].0 == ' ' {
                self.grid[row][col] = ('\u{2504}', style);
            }
        }
    }
}

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

// Sprites on a ~7×5 dot grid around the center, y-down.
fn alien_pixels(kind: AlienKind, frame: bool) -> &'static [(i32, i32)] {
    match (kind, frame) {
        (AlienKind::Squid, true) => &[
            (0, -2),
            (-1, -1), (0, -1), (1, -1),
            (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
            (-2, 1), (0, 1), (2, 1),
            (-1, 2), (1, 2),
        ],
        (AlienKind::Squid, false) => &[
            (0, -2),
            (-1, -1), (0, -1), (1, -1),
            (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0),
            (-2, 1), (0, 1), (2, 1),
            (-3, 2), (3, 2),
        ],
        (AlienKind::Crab, true) => &[
            (-1, -2), (1, -2),
            (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
            (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-3, 2), (-2, 2), (2, 2), (3, 2),
        ],
        (AlienKind::Crab, false) => &[
            (-1, -2), (1, -2),
            (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
            (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-2, 2), (-1, 2), (1, 2), (2, 2),
        ],
        (AlienKind::Octopus, true) => &[
            (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
            (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
            (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-2, 2), (2, 2),
        ],
        (AlienKind::Octopus, false) => &[
            (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
            (-3, -1), (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1), (3, -1),
            (-3, 0), (-2, 0), (0, 0), (2, 0), (3, 0),
            (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
            (-3, 2), (3, 2),
        ],
    }
}

const SHIP: &[(i32, i32)] = &[
    (0, -3),
    (-1, -2), (0, -2), (1, -2),
    (-1, -1), (0, -1), (1, -1),
    (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
    (-4, 1), (-3, 1), (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1), (3, 1), (4, 1),
    (-4, 2), (-3, 2), (-2, 2), (-1, 2), (0, 2), (1, 2), (2, 2), (3, 2), (4, 2),
];

/// Explosion frame: the hull pieces flung outward, spreading with the frame.
fn debris(frame: u32) -> Vec<(i32, i32)> {
    let spread = frame as i32;
    SHIP.iter()
        .enumerate()
        .filter(|(i, _)| (*i as u32 + frame) % 3 != 0)
        .map(|(_, &(dx, dy))| (dx + dx.signum() * spread, dy - spread / 2 + (dx & 1)))
        .collect()
}
