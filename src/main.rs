// This file is part of color-lens and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2025 color-lens contributors

#![windows_subsystem = "windows"] // necessary to remove the console window on Windows

//! Presentation layer: one fixed-size window showing the letterboxed frame
//! with a current-color swatch bar beneath it. All detection logic lives in
//! the library; this binary only wires events to it.
//!
//! Keys: `S` start/stop camera, `O` open image, `C` capture current color,
//! `H` show capture history, `Esc` quit. In image mode, click a pixel to
//! detect its color.

use std::io;
use std::num::NonZeroU32;
use std::sync::Arc;

use debug_print::debug_println;
use softbuffer::{Context, Surface};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use color_lens::capture::{self, Camera, CaptureWorker};
use color_lens::color::RgbColor;
use color_lens::frame::Frame;
use color_lens::geometry::{DisplayGeometry, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use color_lens::palette;
use color_lens::session::Session;
use color_lens::settings::{Settings, CONFIG_PATH};
use color_lens::util::dialog;

static TITLE: &str = "Color Lens";

/// current-color swatch bar along the bottom edge of the window
const SWATCH_HEIGHT: u32 = 40;
const WINDOW_WIDTH: u32 = VIEWPORT_WIDTH;
const WINDOW_HEIGHT: u32 = VIEWPORT_HEIGHT + SWATCH_HEIGHT;

const BACKGROUND_COLOR: u32 = 0x202020;
const CROSSHAIR_COLOR: u32 = 0x00FF00;
const CROSSHAIR_ARM: usize = 15;

fn main() {
    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Settings::default(), // generate new settings file when it doesn't exist
        Err(e) => {
            dialog::show_warning(format!(
                "Error loading settings file \"{}\". Resetting to default settings.\n\n{}",
                CONFIG_PATH.display(),
                e
            ));
            Settings::default()
        }
    };

    let mut dialog_worker = dialog::spawn_worker();

    let event_loop = EventLoop::new();

    // wake the event loop at the configured rate so camera mode can drain
    // the newest frame even while no window events arrive
    let user_event_sender = event_loop.create_proxy();
    let tick_interval = settings.tick_interval;
    std::thread::Builder::new()
        .name("tick-sender".to_string())
        .spawn(move || loop {
            let _ = user_event_sender.send_event(());
            std::thread::sleep(tick_interval);
        })
        .unwrap();

    // unsafe note: these three structs MUST live and die together.
    // It is highly illegal to use the context or surface after the window is dropped.
    // None of these get moved apart, so they drop together at process exit, which is safe.
    let window = init_gui(&event_loop);
    let context = unsafe { Context::new(&window) }.unwrap();
    let mut surface = unsafe { Surface::new(&context, &window) }.unwrap();

    let mut session = Session::new();
    let mut geometry: Option<DisplayGeometry> = None;
    let mut capture_worker: Option<CaptureWorker> = None;
    let mut last_mouse_position = PhysicalPosition::new(0.0, 0.0);
    let mut force_redraw = false;

    // restore the previously loaded image, if any
    if let Some(path) = settings.image_path().cloned() {
        match Frame::open(&path) {
            Ok(frame) => {
                geometry = Some(DisplayGeometry::fit_viewport(frame.width(), frame.height()));
                session.set_frame(Arc::new(frame));
            }
            Err(e) => dialog::show_warning(format!(
                "Failed loading saved image_path \"{}\".\n\n{}",
                path.display(),
                e
            )),
        }
    }

    // pass control to the event loop
    event_loop.run(move |event, _, control_flow| {
        control_flow.set_wait();

        let mut wants_exit = false;

        match event {
            Event::RedrawRequested(_) => {
                draw_window(&mut surface, &session, geometry, capture_worker.is_some(), force_redraw);
                force_redraw = false;
            }
            Event::UserEvent(()) => {
                // camera mode: adopt the newest snapshot and re-sample the
                // center pixel; only the most recent frame matters
                if let Some(worker) = &capture_worker {
                    if let Some(frame) = worker.latest_frame() {
                        geometry = Some(DisplayGeometry::fit_viewport(frame.width(), frame.height()));
                        session.set_frame(frame);
                        if let Some(color) = session.sample_center() {
                            update_title(&window, color);
                        }
                        force_redraw = true;
                        window.request_redraw();
                    }
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => wants_exit = true,
                WindowEvent::CursorMoved { position, .. } => last_mouse_position = position,
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    // clicks only sample in image mode; camera mode samples
                    // the crosshair instead
                    if capture_worker.is_none() {
                        if let Some(geometry) = geometry {
                            let mapped = geometry.map_click(
                                last_mouse_position.x,
                                last_mouse_position.y,
                                VIEWPORT_WIDTH,
                                VIEWPORT_HEIGHT,
                            );
                            // clicks in the letterbox margins are a no-op
                            if let Some((source_x, source_y)) = mapped {
                                if let Some(color) = session.sample_at(source_x, source_y) {
                                    debug_println!("color detected at ({source_x}, {source_y})");
                                    update_title(&window, color);
                                    force_redraw = true;
                                    window.request_redraw();
                                }
                            }
                        }
                    }
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => match key {
                    VirtualKeyCode::S => {
                        toggle_camera(&mut capture_worker, &settings, &mut session, &mut geometry, &window);
                        force_redraw = true;
                        window.request_redraw();
                    }
                    VirtualKeyCode::O => dialog::request_image_path(),
                    VirtualKeyCode::C => match session.capture() {
                        Some(record) => {
                            debug_println!("captured {} {}", record.name, record.hex);
                            window.set_title(&format!(
                                "{TITLE} - captured {} ({}) - total: {}",
                                record.name,
                                record.hex.to_uppercase(),
                                session.history().len()
                            ));
                        }
                        None => dialog::show_warning("No color detected!".to_string()),
                    },
                    VirtualKeyCode::H => dialog::show_info(session.history().render_text()),
                    VirtualKeyCode::Escape => wants_exit = true,
                    _ => (),
                },
                _ => (),
            },
            _ => (),
        }

        // results from the open-image dialog come back through the worker
        if let Ok(Some(path)) = dialog_worker.try_recv_file_path() {
            match Frame::open(&path) {
                Ok(frame) => {
                    if let Some(mut worker) = capture_worker.take() {
                        worker.stop();
                    }
                    geometry = Some(DisplayGeometry::fit_viewport(frame.width(), frame.height()));
                    session.set_frame(Arc::new(frame));
                    settings.persisted.image_path = Some(path);
                    window.set_title(&format!("{TITLE} - image loaded, click to detect color"));
                    force_redraw = true;
                    window.request_redraw();
                }
                // decode failure leaves the previous frame in place
                Err(e) => dialog::show_warning(format!("Error loading image.\n\n{e}")),
            }
        }

        if wants_exit {
            if let Some(mut worker) = capture_worker.take() {
                worker.stop();
            }
            if let Err(e) = settings.save() {
                dialog::show_warning(format!(
                    "Error saving settings to \"{}\".\n\n{}",
                    CONFIG_PATH.display(),
                    e
                ));
            }

            // this makes the application remain open until the user has clicked through any queued dialogs
            dialog_worker.shutdown();
            control_flow.set_exit();
        }
    });
}

/// Start the capture loop if it isn't running, stop it if it is. Open
/// failure is reported and leaves the session unchanged.
fn toggle_camera(
    capture_worker: &mut Option<CaptureWorker>,
    settings: &Settings,
    session: &mut Session,
    geometry: &mut Option<DisplayGeometry>,
    window: &Window,
) {
    match capture_worker.take() {
        Some(mut worker) => {
            worker.stop();
            session.clear_frame();
            *geometry = None;
            window.set_title(&format!("{TITLE} - camera stopped"));
        }
        None => match Camera::open(settings.persisted.camera_index, settings.persisted.mirror_camera) {
            Ok(camera) => {
                session.clear_frame();
                *geometry = None;
                *capture_worker = Some(capture::spawn(camera));
                window.set_title(&format!("{TITLE} - camera started, detecting at crosshair"));
            }
            Err(e) => dialog::show_warning(format!("Cannot access camera!\n\n{e}")),
        },
    }
}

/// Put the full color report in the title bar: name, hex, RGB, HSL.
fn update_title(window: &Window, color: RgbColor) {
    let (h, s, l) = color.to_hsl();
    window.set_title(&format!(
        "{TITLE} | {} | {} | RGB({}, {}, {}) | HSL({}°, {}%, {}%)",
        palette::classify(color),
        color.hex().to_uppercase(),
        color.r,
        color.g,
        color.b,
        h,
        s,
        l
    ));
}

/// Blit the letterboxed frame into the viewport and fill the swatch bar
/// with the current detected color.
fn draw_window(
    surface: &mut Surface,
    session: &Session,
    geometry: Option<DisplayGeometry>,
    camera_mode: bool,
    force: bool,
) {
    surface
        .resize(
            NonZeroU32::new(WINDOW_WIDTH).unwrap(),
            NonZeroU32::new(WINDOW_HEIGHT).unwrap(),
        )
        .unwrap();

    let mut buffer = surface.buffer_mut().unwrap();

    if force || buffer.age() == 0 {
        buffer.fill(BACKGROUND_COLOR);

        if let (Some(frame), Some(geometry)) = (session.frame(), geometry) {
            let display_width = geometry.display_width as usize;
            let scaled = frame.scaled(geometry.display_width, geometry.display_height);
            let (x_offset, y_offset) = geometry.offsets(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
            let x_offset = x_offset as usize;
            let y_offset = y_offset as usize;

            for y in 0..geometry.display_height as usize {
                let source_start = y * display_width;
                let target_start = (y + y_offset) * WINDOW_WIDTH as usize + x_offset;
                buffer[target_start..target_start + display_width]
                    .copy_from_slice(&scaled[source_start..source_start + display_width]);
            }

            // the crosshair is drawn at render time only, so it never
            // contaminates the sampled center pixel
            if camera_mode {
                draw_crosshair(&mut buffer);
            }
        }

        let swatch = session
            .current_color()
            .map(RgbColor::to_argb)
            .unwrap_or(BACKGROUND_COLOR);
        let swatch_start = VIEWPORT_HEIGHT as usize * WINDOW_WIDTH as usize;
        buffer[swatch_start..].fill(swatch);
    }

    buffer.present().unwrap();
}

fn draw_crosshair(buffer: &mut [u32]) {
    let width = WINDOW_WIDTH as usize;
    let center_x = VIEWPORT_WIDTH as usize / 2;
    let center_y = VIEWPORT_HEIGHT as usize / 2;

    for x in center_x - CROSSHAIR_ARM..=center_x + CROSSHAIR_ARM {
        buffer[center_y * width + x] = CROSSHAIR_COLOR;
    }
    for y in center_y - CROSSHAIR_ARM..=center_y + CROSSHAIR_ARM {
        buffer[y * width + center_x] = CROSSHAIR_COLOR;
    }
}

fn init_gui(event_loop: &EventLoop<()>) -> Window {
    WindowBuilder::new()
        .with_title(TITLE)
        .with_resizable(false)
        .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .build(event_loop)
        .unwrap()
}
