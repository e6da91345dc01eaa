//! Buffer layouts for vertex and uniform buffers.
//!
//! Element order is the wire order: offsets are assigned by walking the
//! elements in insertion order.

use super::data_type::ShaderDataType;

/// An element that can be placed in a [`BufferLayout`].
pub trait LayoutElement {
    fn data_type(&self) -> ShaderDataType;

    /// Bytes this element advances the layout cursor by.
    fn size(&self) -> u32;

    fn offset(&self) -> u32;

    fn set_offset(&mut self, offset: u32);
}

/// One attribute of a vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBufferElement {
    pub data_type: ShaderDataType,
    pub size: u32,
    pub offset: u32,
    pub normalized: bool,
}

impl VertexBufferElement {
    pub fn new(data_type: ShaderDataType) -> Self {
        Self::with_normalized(data_type, false)
    }

    pub fn with_normalized(data_type: ShaderDataType, normalized: bool) -> Self {
        Self {
            data_type,
            size: data_type.size(),
            offset: 0,
            normalized,
        }
    }
}

impl From<ShaderDataType> for VertexBufferElement {
    fn from(data_type: ShaderDataType) -> Self {
        Self::new(data_type)
    }
}

impl LayoutElement for VertexBufferElement {
    fn data_type(&self) -> ShaderDataType {
        self.data_type
    }

    fn size(&self) -> u32 {
        self.size
    }

    fn offset(&self) -> u32 {
        self.offset
    }

    fn set_offset(&mut self, offset: u32) {
        self.offset = offset;
    }
}

/// One named member of a uniform block. Its size is the std140 size.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBufferElement {
    pub name: String,
    pub data_type: ShaderDataType,
    pub size: u32,
    pub offset: u32,
}

impl UniformBufferElement {
    pub fn new(name: impl Into<String>, data_type: ShaderDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            size: data_type.std140_align(),
            offset: 0,
        }
    }
}

impl LayoutElement for UniformBufferElement {
    fn data_type(&self) -> ShaderDataType {
        self.data_type
    }

    fn size(&self) -> u32 {
        self.size
    }

    fn offset(&self) -> u32 {
        self.offset
    }

    fn set_offset(&mut self, offset: u32) {
        self.offset = offset;
    }
}

/// Ordered elements plus a stride.
///
/// A stride of zero at construction means "derive it from the elements".
#[derive(Debug, Clone, PartialEq)]
pub struct BufferLayout<E> {
    elements: Vec<E>,
    stride: u32,
    pinned: bool,
}

pub type VertexBufferLayout = BufferLayout<VertexBufferElement>;
pub type UniformBufferLayout = BufferLayout<UniformBufferElement>;

impl<E: LayoutElement> BufferLayout<E> {
    pub fn new(elements: impl IntoIterator<Item = E>) -> Self {
        Self::with_stride(elements, 0)
    }

    pub fn with_stride(elements: impl IntoIterator<Item = E>, stride: u32) -> Self {
        let mut layout = Self {
            elements: elements.into_iter().collect(),
            stride,
            pinned: stride != 0,
        };
        layout.calc_stride_and_offsets();
        layout
    }

    /// Appends an element and recomputes every offset.
    pub fn add_element(&mut self, element: E) {
        self.elements.push(element);
        self.calc_stride_and_offsets();
    }

    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn calc_stride_and_offsets(&mut self) {
        let mut cursor = 0;
        for element in &mut self.elements {
            element.set_offset(cursor);
            cursor += element.size();
        }
        if !self.pinned {
            self.stride = cursor;
        }
    }
}

impl<E> Default for BufferLayout<E> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            stride: 0,
            pinned: false,
        }
    }
}

impl<'a, E> IntoIterator for &'a BufferLayout<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl VertexBufferLayout {
    /// Convenience constructor from bare types, none normalized.
    pub fn from_types(types: &[ShaderDataType]) -> Self {
        Self::new(types.iter().copied().map(VertexBufferElement::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ShaderDataType as T;

    fn offsets<E: LayoutElement>(layout: &BufferLayout<E>) -> Vec<u32> {
        layout.iter().map(LayoutElement::offset).collect()
    }

    // ── vertex layouts ────────────────────────────────────────────────────

    #[test]
    fn float3_short3_short4() {
        let layout = VertexBufferLayout::from_types(&[T::Float3, T::Short3, T::Short4]);
        assert_eq!(offsets(&layout), vec![0, 12, 18]);
        assert_eq!(layout.stride(), 26);
    }

    #[test]
    fn quad_layout_two_float2() {
        let layout = VertexBufferLayout::from_types(&[T::Float2, T::Float2]);
        assert_eq!(offsets(&layout), vec![0, 8]);
        assert_eq!(layout.stride(), 16);
    }

    #[test]
    fn offsets_are_prefix_sums() {
        let types = [T::Float4, T::Byte4, T::Short, T::Mat3, T::Int];
        let layout = VertexBufferLayout::from_types(&types);
        let mut expected = 0;
        for (element, ty) in layout.iter().zip(types) {
            assert_eq!(element.offset, expected);
            expected += ty.size();
        }
        assert_eq!(layout.stride(), expected);
    }

    #[test]
    fn add_element_recomputes() {
        let mut layout = VertexBufferLayout::from_types(&[T::Float3]);
        assert_eq!(layout.stride(), 12);
        layout.add_element(VertexBufferElement::with_normalized(T::Byte4, true));
        assert_eq!(offsets(&layout), vec![0, 12]);
        assert_eq!(layout.stride(), 16);
        assert!(layout.elements()[1].normalized);
    }

    #[test]
    fn pinned_stride_is_kept() {
        let mut layout = VertexBufferLayout::with_stride(
            [T::Float2, T::Float2].map(VertexBufferElement::new),
            32,
        );
        assert_eq!(layout.stride(), 32);
        layout.add_element(T::Float.into());
        assert_eq!(layout.stride(), 32);
        assert_eq!(offsets(&layout), vec![0, 8, 16]);
    }

    #[test]
    fn empty_layout_has_zero_stride() {
        let layout = VertexBufferLayout::default();
        assert!(layout.is_empty());
        assert_eq!(layout.stride(), 0);
    }

    // ── uniform layouts ───────────────────────────────────────────────────

    #[test]
    fn uniform_layout_uses_std140_sizes() {
        let layout = UniformBufferLayout::new([
            UniformBufferElement::new("u_projection", T::Mat4),
            UniformBufferElement::new("u_view", T::Mat4),
            UniformBufferElement::new("u_lightColour", T::Float3),
            UniformBufferElement::new("u_lightPos", T::Float3),
            UniformBufferElement::new("u_viewPos", T::Float3),
        ]);
        assert_eq!(offsets(&layout), vec![0, 64, 128, 144, 160]);
        assert_eq!(layout.stride(), 176);
    }

    #[test]
    fn uniform_offsets_stable_across_recompute() {
        let mut layout = UniformBufferLayout::new([UniformBufferElement::new("a", T::Float3)]);
        layout.add_element(UniformBufferElement::new("b", T::Float));
        let first = offsets(&layout);
        layout.calc_stride_and_offsets();
        assert_eq!(offsets(&layout), first);
        assert_eq!(layout.stride(), 20);
    }
}
