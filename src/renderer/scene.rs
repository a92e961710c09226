//! Scene building
//!
//! `build_scene` turns the ride state into an ordered list of draw batches
//! in world coordinates. It is pure: no GPU access, no caching, rebuilt
//! every frame.

use glam::{Affine2, Vec2};

use super::shapes::{circle, line, rect, textured_quad};
use super::texture::TextureId;
use super::vertex::colors::{self, with_alpha};
use super::vertex::{TexVertex, Vertex};
use crate::consts::SEAT_COUNT;
use crate::settings::Settings;
use crate::sim::{RidePhase, RideState, Seat, car_transform, seat_local, track};

/// Vertical supports span this many track intervals
const SUPPORT_INTERVALS: usize = 20;
/// Ground level where supports start
const SUPPORT_BASE_Y: f32 = -0.6;
/// Braces are only drawn when their crossing point is above this height
const BRACE_MIN_Y: f32 = -0.55;
/// Lower rail offset below the upper rail
const LOWER_RAIL_OFFSET: f32 = 0.025;

const CART_SIZE: Vec2 = Vec2::new(0.18, 0.07);
const PASSENGER_SIZE: Vec2 = Vec2::new(0.032, 0.05);
const BELT_SIZE: Vec2 = Vec2::new(0.028, 0.025);
/// Belt sits this far below the seat centre
const BELT_DROP: f32 = 0.0025;

/// Seat dots: offset below the track point, spacing and radius
const INDICATOR_DROP: f32 = 0.08;
const INDICATOR_SPACING: f32 = 0.02;
const INDICATOR_RADIUS: f32 = 0.006;
const INDICATOR_ALPHA: f32 = 0.8;

const INFO_POS: Vec2 = Vec2::new(0.25, -0.98);
const INFO_SIZE: Vec2 = Vec2::new(0.7, 0.17);
const INFO_ALPHA: f32 = 0.85;

/// One draw call worth of geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    Colored(Vec<Vertex>),
    Textured {
        texture: TextureId,
        vertices: Vec<TexVertex>,
    },
}

/// Ordered draw batches, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    batches: Vec<Batch>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Append colored triangles, merging with a preceding colored batch
    pub fn push_colored(&mut self, vertices: Vec<Vertex>) {
        if vertices.is_empty() {
            return;
        }
        match self.batches.last_mut() {
            Some(Batch::Colored(existing)) => existing.extend(vertices),
            _ => self.batches.push(Batch::Colored(vertices)),
        }
    }

    /// Append a textured quad, merging with a preceding batch of the same texture
    pub fn push_textured(&mut self, texture: TextureId, vertices: Vec<TexVertex>) {
        if vertices.is_empty() {
            return;
        }
        match self.batches.last_mut() {
            Some(Batch::Textured {
                texture: current,
                vertices: existing,
            }) if *current == texture => existing.extend(vertices),
            _ => self.batches.push(Batch::Textured { texture, vertices }),
        }
    }

    /// Total colored vertices across batches
    #[cfg(test)]
    pub fn colored_vertex_count(&self) -> usize {
        self.batches
            .iter()
            .map(|b| match b {
                Batch::Colored(v) => v.len(),
                Batch::Textured { .. } => 0,
            })
            .sum()
    }

    /// Textured vertices drawn with `texture`
    #[cfg(test)]
    pub fn textured_vertices(&self, texture: TextureId) -> impl Iterator<Item = &TexVertex> {
        self.batches.iter().flat_map(move |b| match b {
            Batch::Textured {
                texture: t,
                vertices,
            } if *t == texture => vertices.as_slice(),
            _ => &[][..],
        })
    }
}

/// Build the scene for the current ride state
pub fn build_scene(state: &RideState, settings: &Settings) -> Scene {
    let mut scene = Scene::new();
    let segments = settings.track_detail.circle_segments();

    draw_background(&mut scene, segments);
    draw_track(&mut scene, settings);
    draw_vehicle(&mut scene, state);
    if settings.show_seat_indicators {
        draw_seat_indicators(&mut scene, state, segments);
    }
    if settings.show_hud {
        draw_hud(&mut scene, state, segments);
    }
    if settings.show_info_panel {
        let center = INFO_POS + INFO_SIZE * 0.5;
        scene.push_textured(
            TextureId::Info,
            textured_quad(&Affine2::IDENTITY, center, INFO_SIZE, INFO_ALPHA),
        );
    }

    scene
}

fn draw_background(scene: &mut Scene, segments: u32) {
    scene.push_colored(rect(
        Vec2::new(-2.0, -0.2),
        Vec2::new(4.0, 1.5),
        colors::SKY,
    ));

    const CLOUDS: [(f32, f32, f32); 8] = [
        (-0.8, 0.6, 0.15),
        (-0.6, 0.62, 0.12),
        (-0.5, 0.58, 0.1),
        (0.5, 0.7, 0.18),
        (0.7, 0.72, 0.14),
        (0.85, 0.68, 0.1),
        (1.2, 0.5, 0.12),
        (1.35, 0.52, 0.1),
    ];
    for (x, y, r) in CLOUDS {
        scene.push_colored(circle(Vec2::new(x, y), r, colors::CLOUD, segments));
    }

    scene.push_colored(rect(
        Vec2::new(-2.0, -1.0),
        Vec2::new(4.0, 0.8),
        colors::GRASS,
    ));
    scene.push_colored(rect(
        Vec2::new(-2.0, -1.0),
        Vec2::new(4.0, 0.4),
        colors::GRASS_FRONT,
    ));
}

fn draw_track(scene: &mut Scene, settings: &Settings) {
    let detail = settings.track_detail;
    let drop = Vec2::new(0.0, 0.02);

    // Supports
    let support_points: Vec<Vec2> = track::samples(SUPPORT_INTERVALS)
        .map(track::position)
        .collect();
    for p in &support_points {
        scene.push_colored(line(
            Vec2::new(p.x, SUPPORT_BASE_Y),
            *p - drop,
            colors::SUPPORT,
            0.015,
        ));
    }

    // Cross braces
    for pair in support_points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let mid_y = (a.y + b.y) / 2.0 - 0.1;
        if mid_y > BRACE_MIN_Y {
            scene.push_colored(line(a - drop, Vec2::new(b.x, mid_y), colors::BRACE, 0.008));
            scene.push_colored(line(b - drop, Vec2::new(a.x, mid_y), colors::BRACE, 0.008));
        }
    }

    // Rails
    let rail: Vec<Vec2> = track::samples(detail.rail_segments())
        .map(track::position)
        .collect();
    let lower = Vec2::new(0.0, LOWER_RAIL_OFFSET);
    for pair in rail.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        scene.push_colored(line(a, b, colors::RAIL_UPPER, 0.012));
        scene.push_colored(line(a - lower, b - lower, colors::RAIL_LOWER, 0.008));
    }

    // Ties, across the rails
    let ties = detail.tie_count();
    for i in 0..ties {
        let t = i as f32 / ties as f32;
        let p = track::position(t) - Vec2::new(0.0, 0.012);
        let across = Vec2::from_angle(track::angle(t)).perp() * 0.02;
        scene.push_colored(line(p + across, p - across, colors::TIE, 0.006));
    }
}

fn draw_vehicle(scene: &mut Scene, state: &RideState) {
    let transform = car_transform(state.track_pos);

    scene.push_textured(
        TextureId::Cart,
        textured_quad(&transform, Vec2::ZERO, CART_SIZE, 1.0),
    );

    for (i, seat) in state.roster.seats().iter().enumerate() {
        if !seat.occupied {
            continue;
        }
        let center = seat_local(i);
        let sprite = if seat.distressed {
            TextureId::Sick
        } else {
            TextureId::Passenger
        };
        scene.push_textured(
            sprite,
            textured_quad(&transform, center, PASSENGER_SIZE, 1.0),
        );
        if seat.belted {
            scene.push_textured(
                TextureId::Belt,
                textured_quad(
                    &transform,
                    center - Vec2::new(0.0, BELT_DROP),
                    BELT_SIZE,
                    1.0,
                ),
            );
        }
    }
}

/// Indicator color for a seat
pub fn seat_color(seat: &Seat) -> [f32; 4] {
    if !seat.occupied {
        colors::SEAT_EMPTY
    } else if seat.distressed {
        colors::SEAT_SICK
    } else if seat.belted {
        colors::SEAT_BELTED
    } else {
        colors::SEAT_UNBELTED
    }
}

/// Centre of seat `index`'s indicator dot for a car at `track_point`
pub fn indicator_position(track_point: Vec2, index: usize) -> Vec2 {
    let first = -(SEAT_COUNT as f32 - 1.0) / 2.0 * INDICATOR_SPACING;
    Vec2::new(
        track_point.x + first + index as f32 * INDICATOR_SPACING,
        track_point.y - INDICATOR_DROP,
    )
}

fn draw_seat_indicators(scene: &mut Scene, state: &RideState, segments: u32) {
    let point = track::position(state.track_pos);
    for (i, seat) in state.roster.seats().iter().enumerate() {
        scene.push_colored(circle(
            indicator_position(point, i),
            INDICATOR_RADIUS,
            with_alpha(seat_color(seat), INDICATOR_ALPHA),
            segments,
        ));
    }
}

/// Lamp color for a phase
pub fn phase_color(phase: RidePhase) -> [f32; 4] {
    match phase {
        RidePhase::Loading => colors::PHASE_LOADING,
        RidePhase::Running => colors::PHASE_RUNNING,
        RidePhase::Stopping | RidePhase::Stopped => colors::PHASE_STOPPED,
        RidePhase::Returning => colors::PHASE_RETURNING,
        RidePhase::Unloading => colors::PHASE_UNLOADING,
    }
}

/// Grade lamp color for a track position
pub fn grade_color(t: f32) -> [f32; 4] {
    if track::is_downhill(t) {
        colors::GRADE_DOWN
    } else if track::is_uphill(t) {
        colors::GRADE_UP
    } else {
        colors::GRADE_LEVEL
    }
}

fn draw_hud(scene: &mut Scene, state: &RideState, segments: u32) {
    const BAR_POS: Vec2 = Vec2::new(-0.88, 0.77);
    const BAR_SIZE: Vec2 = Vec2::new(0.38, 0.03);

    scene.push_colored(rect(
        Vec2::new(-0.98, 0.75),
        Vec2::new(0.52, 0.22),
        colors::HUD_PANEL,
    ));

    scene.push_colored(circle(
        Vec2::new(-0.93, 0.92),
        0.03,
        phase_color(state.phase),
        segments,
    ));
    scene.push_colored(circle(
        Vec2::new(-0.85, 0.92),
        0.02,
        grade_color(state.track_pos),
        segments,
    ));

    // Speed bar: fill, then the translucent track over it
    let ratio = state.speed_ratio().clamp(0.0, 1.0);
    if ratio > 0.0 {
        scene.push_colored(rect(
            BAR_POS,
            Vec2::new(BAR_SIZE.x * ratio, BAR_SIZE.y),
            colors::SPEED_FILL,
        ));
    }
    scene.push_colored(rect(BAR_POS, BAR_SIZE, colors::SPEED_TRACK));

    // Legend, one dot per lamp color
    let legend = [
        colors::PHASE_LOADING,
        colors::PHASE_RUNNING,
        colors::PHASE_STOPPED,
        colors::PHASE_RETURNING,
        colors::PHASE_UNLOADING,
    ];
    for (i, color) in legend.into_iter().enumerate() {
        scene.push_colored(circle(
            Vec2::new(-0.93 + i as f32 * 0.1, 0.86),
            0.015,
            with_alpha(color, 0.9),
            segments,
        ));
    }
}
