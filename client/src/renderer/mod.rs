mod palette;
mod renderthing;

use std::sync::{Arc, RwLock};

use libca::{AutomatonGrid, Cell};
use log::{debug, warn};
use palette::CellPalette;
use pixels::wgpu::Color;
use renderthing::{Renderer, frame::RenderFrame, window::RendererWindowConfig};
use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::{State, config::Layout};

const TARGET_FPS: u64 = 30;

/// Opens the viewer window and blocks until it is closed.
///
/// With `per_click_iteration` every left click inside the window produces the next row.
pub fn run(
    state_arc: Arc<RwLock<State>>,
    layout: Layout,
    per_click_iteration: bool,
) -> anyhow::Result<()> {
    let palette = CellPalette::default();

    let draw_state_arc = state_arc.clone();
    let event_state_arc = state_arc;

    let renderer = Renderer::new(RendererWindowConfig {
        title: "Elementary CA".to_owned(),
        window_width: layout.window_width,
        window_height: layout.window_height,
        buffer_width: layout.grid_width as u32,
        buffer_height: layout.grid_height as u32,
        clear_color: Color::WHITE,
        target_fps: TARGET_FPS,
        draw_callback: Box::new(move |mut frame: RenderFrame| {
            let Ok(state) = draw_state_arc.read() else {
                warn!("Skipping frame, state lock poisoned");
                return;
            };
            draw(&state.grid, &palette, &mut frame);
        }),
        event_callback: per_click_iteration.then(|| {
            Box::new(move |event: &WindowEvent| on_event(&event_state_arc, event))
                as Box<dyn FnMut(&WindowEvent)>
        }),
    })?;

    renderer.run()
}

/// Paints populated rows with the palette and everything below them as background.
fn draw(grid: &AutomatonGrid, palette: &CellPalette, frame: &mut RenderFrame) {
    frame.fill(palette.color(Cell::Dead));

    for (y, cells) in grid.rows().enumerate() {
        let Some(pixels) = frame.row_mut(y as u32) else {
            break;
        };

        for (pixel, cell) in pixels.zip(cells) {
            *pixel = palette.color(*cell);
        }
    }
}

fn on_event(state_arc: &Arc<RwLock<State>>, event: &WindowEvent) {
    if let WindowEvent::MouseInput {
        state: mouse_state,
        button,
        ..
    } = event
    {
        on_mouse_input(state_arc, *mouse_state, *button);
    }
}

/// A left press produces the next row.
fn on_mouse_input(state_arc: &Arc<RwLock<State>>, mouse_state: ElementState, button: MouseButton) {
    if !mouse_state.is_pressed() || button != MouseButton::Left {
        return;
    }

    let Ok(mut state) = state_arc.write() else {
        warn!("Ignoring click, state lock poisoned");
        return;
    };

    match state.grid.produce_next_row() {
        Some(row) => debug!("Click produced row {}", row.index),
        None => debug!("Click ignored, grid is complete"),
    }
}

#[cfg(test)]
mod tests {
    use libca::{RuleTable, SeedPolicy, parse_row};

    use super::{renderthing::frame::PIXEL_BITS, *};

    fn read_row(frame: &RenderFrame, palette: &CellPalette, y: u32) -> Option<Vec<Cell>> {
        if y >= frame.height {
            return None;
        }

        let row_bytes = frame.width as usize * PIXEL_BITS;
        frame.buffer[y as usize * row_bytes..][..row_bytes]
            .chunks_exact(PIXEL_BITS)
            .map(|chunk| {
                let pixel: [u8; PIXEL_BITS] = chunk.try_into().ok()?;
                [Cell::Dead, Cell::Alive]
                    .into_iter()
                    .find(|cell| palette.color(*cell) == pixel)
            })
            .collect()
    }

    fn grid(height: usize) -> AutomatonGrid {
        AutomatonGrid::new(
            5,
            height,
            RuleTable::default(),
            SeedPolicy::from_text(Some("00100")).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn drawn_rows_read_back_as_cells() {
        let mut grid = grid(4);
        grid.produce_next_row();
        grid.produce_next_row();

        let palette = CellPalette::default();
        let mut buffer = vec![0u8; 5 * 4 * PIXEL_BITS];
        let mut frame = RenderFrame {
            width: 5,
            height: 4,
            buffer: &mut buffer,
        };
        draw(&grid, &palette, &mut frame);

        assert_eq!(read_row(&frame, &palette, 0).unwrap(), parse_row("00100").unwrap());
        assert_eq!(read_row(&frame, &palette, 1).unwrap(), parse_row("01100").unwrap());
        // Rows that weren't produced yet show up as background.
        assert_eq!(read_row(&frame, &palette, 3).unwrap(), vec![Cell::Dead; 5]);
        assert!(read_row(&frame, &palette, 4).is_none());
    }

    #[test]
    fn left_presses_step_the_grid() {
        let state_arc = Arc::new(RwLock::new(State::new(grid(2), 1)));

        on_mouse_input(&state_arc, ElementState::Released, MouseButton::Left);
        on_mouse_input(&state_arc, ElementState::Pressed, MouseButton::Right);
        assert_eq!(state_arc.read().unwrap().grid.next_row(), 0);

        on_mouse_input(&state_arc, ElementState::Pressed, MouseButton::Left);
        assert_eq!(state_arc.read().unwrap().grid.row_text(0).unwrap(), "00100");

        for _ in 0..2 {
            on_mouse_input(&state_arc, ElementState::Pressed, MouseButton::Left);
        }
        assert!(state_arc.read().unwrap().grid.is_complete());
    }
}
