use wgpu::Device;

use crate::gfx::geometry::{GeometryData, Topology};

/// Handle to a mesh stored in a [`MeshArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

impl MeshId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// GPU buffers of one uploaded mesh. Buffers are released when this is dropped.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    draw_count: u32,
}

impl GpuMesh {
    pub fn new(device: &Device, label: &str, geometry: &GeometryData) -> Self {
        let vertices = geometry.to_vertices();

        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );

        let index_buffer = geometry.is_indexed().then(|| {
            wgpu::util::DeviceExt::create_buffer_init(
                device,
                &wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label} Index Buffer")),
                    contents: bytemuck::cast_slice(&geometry.indices),
                    usage: wgpu::BufferUsages::INDEX,
                },
            )
        });

        Self {
            vertex_buffer,
            index_buffer,
            draw_count: geometry.element_count() as u32,
        }
    }
}

struct MeshSlot {
    label: String,
    geometry: GeometryData,
    gpu: Option<GpuMesh>,
}

/// Owns every mesh of a demo.
///
/// Geometry is inserted on the CPU side at any time; [`MeshArena::upload_pending`]
/// creates the GPU buffers once a device exists. Objects refer to meshes by
/// [`MeshId`], so many objects can share one upload.
#[derive(Default)]
pub struct MeshArena {
    slots: Vec<MeshSlot>,
}

impl MeshArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: &str, geometry: GeometryData) -> MeshId {
        let id = MeshId(self.slots.len());
        self.slots.push(MeshSlot {
            label: label.to_owned(),
            geometry,
            gpu: None,
        });
        id
    }

    pub fn geometry(&self, id: MeshId) -> Option<&GeometryData> {
        self.slots.get(id.0).map(|slot| &slot.geometry)
    }

    pub fn topology(&self, id: MeshId) -> Option<Topology> {
        self.geometry(id).map(|geometry| geometry.topology)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Meshes that still need GPU buffers. Empty geometry never does.
    pub fn pending_uploads(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.gpu.is_none() && !slot.geometry.is_empty())
            .count()
    }

    /// Creates buffers for every mesh inserted since the last call.
    pub fn upload_pending(&mut self, device: &Device) -> usize {
        let mut uploaded = 0;
        for slot in self.slots.iter_mut() {
            if slot.gpu.is_some() || slot.geometry.is_empty() {
                continue;
            }
            log::debug!(
                "Uploading mesh '{}' ({} vertices, {} indices)",
                slot.label,
                slot.geometry.vertex_count(),
                slot.geometry.indices.len()
            );
            slot.gpu = Some(GpuMesh::new(device, &slot.label, &slot.geometry));
            uploaded += 1;
        }
        uploaded
    }

    /// Uploaded buffers for `id`, if any.
    pub fn gpu(&self, id: MeshId) -> Option<&GpuMesh> {
        self.slots.get(id.0).and_then(|slot| slot.gpu.as_ref())
    }
}

/// Render-pass extension that binds a [`GpuMesh`] and issues its draw.
pub trait DrawMesh<'a> {
    fn draw_gpu_mesh(&mut self, mesh: &'a GpuMesh);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_gpu_mesh(&mut self, mesh: &'b GpuMesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        match &mesh.index_buffer {
            Some(index_buffer) => {
                self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                self.draw_indexed(0..mesh.draw_count, 0, 0..1);
            }
            None => self.draw(0..mesh.draw_count, 0..1),
        }
    }
}
