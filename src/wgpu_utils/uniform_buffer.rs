// src/wgpu_utils/uniform_buffer.rs - One uniform slot per draw, bound with dynamic offsets
use std::marker::PhantomData;

/// Uniform buffer holding an array of `Content`, one aligned slot per draw.
///
/// Each slot starts at a multiple of the device's
/// `min_uniform_buffer_offset_alignment`, so a single bind group can address
/// any slot through a dynamic offset.
pub struct DynamicUniformBuffer<Content> {
    buffer: wgpu::Buffer,
    content_type: PhantomData<Content>,
    alignment: u64,
    capacity: usize,
    previous_content: Vec<u8>,
}

impl<Content: bytemuck::Pod> DynamicUniformBuffer<Content> {
    fn name() -> &'static str {
        let type_name = std::any::type_name::<Content>();
        let pos = type_name.rfind(':').unwrap_or(0);
        if pos > 0 {
            &type_name[(pos + 1)..]
        } else {
            type_name
        }
    }

    /// Byte distance between two consecutive slots.
    pub fn aligned_stride(alignment: u64) -> u64 {
        let size = std::mem::size_of::<Content>() as u64;
        let alignment = alignment.max(1);
        size.div_ceil(alignment) * alignment
    }

    /// Lays `contents` out at `stride` intervals, zero-filling the padding.
    pub fn pack(contents: &[Content], stride: u64) -> Vec<u8> {
        let stride = stride as usize;
        let mut bytes = vec![0u8; contents.len() * stride];
        for (i, content) in contents.iter().enumerate() {
            let slot = bytemuck::bytes_of(content);
            bytes[i * stride..i * stride + slot.len()].copy_from_slice(slot);
        }
        bytes
    }

    fn create_buffer(device: &wgpu::Device, alignment: u64, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("DynamicUniformBuffer: {}", Self::name())),
            size: Self::aligned_stride(alignment) * capacity.max(1) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn new(device: &wgpu::Device, alignment: u64, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        DynamicUniformBuffer {
            buffer: Self::create_buffer(device, alignment, capacity),
            content_type: PhantomData,
            alignment,
            capacity,
            previous_content: Vec::new(),
        }
    }

    /// Uploads one slot per element of `contents`.
    ///
    /// Returns `true` when the buffer had to grow, in which case any bind
    /// group over the old buffer must be recreated.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, contents: &[Content]) -> bool {
        let mut grown = false;
        if contents.len() > self.capacity {
            self.capacity = contents.len().next_power_of_two();
            self.buffer = Self::create_buffer(device, self.alignment, self.capacity);
            self.previous_content.clear();
            grown = true;
            log::debug!(
                "Grew {} to {} slots",
                Self::name(),
                self.capacity
            );
        }

        let bytes = Self::pack(contents, self.stride());
        if bytes.is_empty() || self.previous_content == bytes {
            return grown;
        }
        queue.write_buffer(&self.buffer, 0, &bytes);
        self.previous_content = bytes;
        grown
    }

    pub fn stride(&self) -> u64 {
        Self::aligned_stride(self.alignment)
    }

    /// Dynamic offset of slot `index`.
    pub fn offset_of(&self, index: usize) -> wgpu::DynamicOffset {
        (self.stride() * index as u64) as wgpu::DynamicOffset
    }

    /// Binding covering a single slot; the dynamic offset selects which one.
    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: 0,
            size: wgpu::BufferSize::new(std::mem::size_of::<Content>() as u64),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(C)]
    #[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
    struct Slot96 {
        data: [f32; 24],
    }

    #[test]
    fn stride_rounds_up_to_alignment() {
        assert_eq!(DynamicUniformBuffer::<Slot96>::aligned_stride(256), 256);
        assert_eq!(DynamicUniformBuffer::<Slot96>::aligned_stride(64), 128);
        assert_eq!(DynamicUniformBuffer::<Slot96>::aligned_stride(32), 96);
    }

    #[test]
    fn pack_places_each_slot_on_its_stride() {
        let slots = [Slot96 { data: [1.0; 24] }, Slot96 { data: [2.0; 24] }];
        let bytes = DynamicUniformBuffer::<Slot96>::pack(&slots, 128);

        assert_eq!(bytes.len(), 256);
        assert_eq!(&bytes[0..4], bytemuck::bytes_of(&1.0f32));
        assert!(bytes[96..128].iter().all(|b| *b == 0));
        assert_eq!(&bytes[128..132], bytemuck::bytes_of(&2.0f32));
    }
}
