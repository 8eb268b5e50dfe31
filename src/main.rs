//! Pulsegrid - microphone-reactive quadrant shader display
//!
//! Four shader regions tile the window, each animating a different
//! pattern from the same shared inputs: microphone loudness scaled by
//! a user sensitivity, elapsed time, and a user-chosen color.

mod audio;
mod cli;
mod layout;
mod params;
mod rendering;
mod state;

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use audio::MicSystem;
use cli::Args;
use params::{RenderConfig, SamplerConfig};
use rendering::{RenderSystem, Uniforms};
use state::VisualState;

/// Colors selectable with the digit keys
const PALETTE: [[f32; 3]; 6] = [
    [0.0, 1.0, 1.0], // cyan
    [1.0, 0.0, 1.0], // magenta
    [1.0, 0.8, 0.0], // amber
    [0.2, 1.0, 0.2], // green
    [1.0, 0.2, 0.2], // red
    [1.0, 1.0, 1.0], // white
];

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Audio capture; None means no stream yet, ticks keep running with
    // amplitude frozen
    audio: Option<MicSystem>,

    // Shared per-frame inputs read by every region
    state: VisualState,

    // Configuration
    render_config: RenderConfig,

    // Time tracking
    start_time: Instant,
}

impl App {
    fn new(args: &Args) -> Self {
        let mut state = VisualState::default();
        state.set_color(args.initial_color());
        state.set_sensitivity(args.sensitivity);

        Self {
            window: None,
            render_system: None,
            audio: None,
            state,
            render_config: RenderConfig::default(),
            start_time: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Pulsegrid - Audio-Reactive Quadrants")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window))).unwrap();

        // Initialize audio capture. Failure keeps the display ticking
        // with amplitude frozen at its initial value.
        let audio = match MicSystem::new(SamplerConfig::default()) {
            Ok(mic) => Some(mic),
            Err(e) => {
                eprintln!("Audio unavailable, visuals stay static: {}", e);
                None
            }
        };

        println!("\nPulsegrid is running!");
        println!("Up/Down adjust sensitivity, 1-6 pick a color, ESC quits\n");

        self.start_time = Instant::now();
        self.window = Some(window);
        self.render_system = Some(render_system);
        self.audio = audio;
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code),
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    /// Settings controls: sensitivity nudges and palette colors
    fn handle_key(&mut self, event_loop: &winit::event_loop::ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::ArrowUp => {
                self.state.nudge_sensitivity(1);
                println!("Sensitivity: {:.1}", self.state.sensitivity());
            }
            KeyCode::ArrowDown => {
                self.state.nudge_sensitivity(-1);
                println!("Sensitivity: {:.1}", self.state.sensitivity());
            }
            KeyCode::Digit1 => self.state.set_color(PALETTE[0]),
            KeyCode::Digit2 => self.state.set_color(PALETTE[1]),
            KeyCode::Digit3 => self.state.set_color(PALETTE[2]),
            KeyCode::Digit4 => self.state.set_color(PALETTE[3]),
            KeyCode::Digit5 => self.state.set_color(PALETTE[4]),
            KeyCode::Digit6 => self.state.set_color(PALETTE[5]),
            _ => {}
        }
    }

    /// Run one tick: sample audio, advance the shared state, render
    /// all four regions
    fn render_frame(&mut self) {
        let Some(ref mut render_system) = self.render_system else {
            return;
        };

        let time_s = self.start_time.elapsed().as_secs_f32();

        // None both before a stream exists and before its first full
        // buffer; either way this tick keeps the previous amplitude
        let loudness = self.audio.as_ref().and_then(|mic| mic.sample());
        self.state.advance(loudness, time_s);

        let uniforms = Uniforms {
            view_proj: render_system.view_proj(),
            color: self.state.color,
            amplitude: self.state.amplitude,
            time: self.state.elapsed_s,
            _padding: [0.0; 3],
        };
        render_system.update_uniforms(&uniforms);

        match render_system.render() {
            Ok(()) => {}
            // Surface loss is recoverable: reconfigure at the current
            // size and pick up again next tick
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(e) => eprintln!("Render error: {:?}", e),
        }
    }
}

fn main() {
    let args = Args::parse();

    println!("Pulsegrid - microphone-reactive quadrant visualizer");
    println!("Initializing systems...\n");

    let mut app = App::new(&args);
    let event_loop = EventLoop::new().unwrap();
    let _ = event_loop.run_app(&mut app);
}
