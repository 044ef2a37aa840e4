use wgpu::util::DeviceExt;
use wgpu::{BindGroup, BindGroupLayout, Buffer, BufferUsages, Device, Queue};

use crate::simulation::{CellGrid, Mode};

/// GPU copy of the board: cell storage, render uniforms and the bind group
/// tying them to the render pipeline's layout
pub struct GridBuffers {
    cells: Buffer,
    params: Buffer,
    bind_group: BindGroup,
    /// Side the cell buffer is currently sized for
    side: u32,
}

/// Mirrors `RenderParams` in render.wgsl
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    pub grid_side: u32,
    pub mode: u32,   // 0 = camera, 1 = game
    pub paused: u32, // 1 = tint frozen game
    pub _padding: u32,
}

impl RenderParams {
    pub fn new(grid_side: u32, mode: Mode) -> Self {
        let (mode, paused) = match mode {
            Mode::Camera => (0, 0),
            Mode::Game { paused } => (1, paused as u32),
        };
        Self {
            grid_side,
            mode,
            paused,
            _padding: 0,
        }
    }

    /// Nothing to draw: the shader paints the background only
    pub fn empty() -> Self {
        Self::new(0, Mode::Camera)
    }
}

impl GridBuffers {
    /// Empty board bound against `layout`
    pub fn new(device: &Device, layout: &BindGroupLayout) -> Self {
        let cells = create_cells_buffer(device, 0);
        let params = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("board-params"),
            contents: bytemuck::bytes_of(&RenderParams::empty()),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let bind_group = create_bind_group(device, layout, &cells, &params);

        Self {
            cells,
            params,
            bind_group,
            side: 0,
        }
    }

    pub fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }

    /// Copy `grid` to the GPU. The cell buffer, and with it the bind group,
    /// is only rebuilt when the grid side differs from the last upload.
    pub fn upload(
        &mut self,
        device: &Device,
        queue: &Queue,
        layout: &BindGroupLayout,
        grid: &CellGrid,
        mode: Mode,
    ) {
        let side = grid.side() as u32;
        if side != self.side {
            log::info!("Board side {} -> {}, rebuilding cell buffer", self.side, side);
            self.cells = create_cells_buffer(device, side);
            self.bind_group = create_bind_group(device, layout, &self.cells, &self.params);
            self.side = side;
        }

        if side > 0 {
            queue.write_buffer(&self.cells, 0, bytemuck::cast_slice(&grid.to_u32_cells()));
        }
        queue.write_buffer(&self.params, 0, bytemuck::bytes_of(&RenderParams::new(side, mode)));
    }

    /// Blank the board (no grid yet, or after a reset). The cell buffer is kept.
    pub fn clear(&self, queue: &Queue) {
        queue.write_buffer(&self.params, 0, bytemuck::bytes_of(&RenderParams::empty()));
    }
}

/// Byte size of the cell buffer for a board of `side`; never zero since
/// storage bindings may not be empty
pub fn cells_buffer_size(side: u32) -> u64 {
    let cell_count = (side as u64 * side as u64).max(1);
    cell_count * std::mem::size_of::<u32>() as u64
}

fn create_cells_buffer(device: &Device, side: u32) -> Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("board-cells"),
        size: cells_buffer_size(side),
        usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_bind_group(
    device: &Device,
    layout: &BindGroupLayout,
    cells: &Buffer,
    params: &Buffer,
) -> BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("board-bind-group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: cells.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: params.as_entire_binding(),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_params_size() {
        assert_eq!(std::mem::size_of::<RenderParams>(), 16);
    }

    #[test]
    fn test_render_params_mode_flags() {
        let camera = RenderParams { grid_side: 4, mode: 0, paused: 0, _padding: 0 };
        assert_eq!(RenderParams::new(4, Mode::Camera), camera);
        assert_eq!(RenderParams::new(4, Mode::Game { paused: false }).mode, 1);
        assert_eq!(RenderParams::new(4, Mode::Game { paused: true }).paused, 1);
        assert_eq!(RenderParams::empty().grid_side, 0);
    }

    #[test]
    fn test_cells_buffer_size() {
        assert_eq!(cells_buffer_size(0), 4, "Empty board still needs a bindable buffer");
        assert_eq!(cells_buffer_size(320), 320 * 320 * 4);
    }
}
