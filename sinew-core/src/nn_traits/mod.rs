//! The capability set every neural network module implements.
//!
//! - [Module] runs the module on an input.
//! - [ResetParams] re-initializes parameters (a no-op for stateless modules).
//! - [PrettyPrint] writes a human readable description.
//! - [Serializable], [SaveSafeTensors] and [LoadSafeTensors] take part in saving & loading.
//! - [BuildOnDevice] turns an architecture description into a module on a device.
//!
//! Tuples and [Vec]s of modules implement all of these by running their
//! members in order, which is how sequential models are expressed. When the
//! chain is only known at runtime use [Sequential], which stores its members
//! as [DynModule] trait objects.

mod sequential;
mod tuples;
mod vecs;

pub use sequential::{DynModule, Sequential};

use crate::{
    dtypes::Dtype,
    tensor::{Cpu, Error, SafeTensorEntry, Tensor},
};
use std::path::Path;

/// A unit of a neural network. Acts on the generic `X`
/// and produces `Module::Output`.
///
/// Generic `X` means you can implement module for multiple
/// input types on the same struct.
pub trait Module<X> {
    type Output;

    fn try_forward(&self, x: X) -> Result<Self::Output, Error>;

    fn try_forward_mut(&mut self, x: X) -> Result<Self::Output, Error> {
        self.try_forward(x)
    }

    fn forward(&self, x: X) -> Self::Output {
        self.try_forward(x).unwrap()
    }

    fn forward_mut(&mut self, x: X) -> Self::Output {
        self.try_forward_mut(x).unwrap()
    }
}

/// Re-initializes the parameters of a module.
pub trait ResetParams {
    fn reset_params(&mut self) {
        self.try_reset_params().unwrap()
    }
    fn try_reset_params(&mut self) -> Result<(), Error>;
}

/// Writes a short, human readable description of a module.
pub trait PrettyPrint {
    fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result;

    /// Collects [PrettyPrint::pretty_print] into a [String].
    fn try_pretty_string(&self) -> Result<String, std::fmt::Error> {
        let mut s = String::new();
        self.pretty_print(&mut s)?;
        Ok(s)
    }

    fn pretty_string(&self) -> String {
        self.try_pretty_string().unwrap()
    }
}

/// Prints `name(` followed by one indented `(i): child` line per child, then `)`.
///
/// Stops at the first child that failed to print.
pub fn pretty_print_children(
    f: &mut dyn std::fmt::Write,
    name: &str,
    children: impl IntoIterator<Item = Result<String, std::fmt::Error>>,
) -> std::fmt::Result {
    writeln!(f, "{name}(")?;
    for (i, child) in children.into_iter().enumerate() {
        let child = child?.replace('\n', "\n  ");
        writeln!(f, "  ({i}): {child}")?;
    }
    write!(f, ")")
}

/// Whether a module can be saved & loaded.
///
/// Containers consult this before writing or reading a member, and skip the
/// members that return `false`.
pub trait Serializable {
    fn is_serializable(&self) -> bool {
        true
    }
}

/// Joins the location of a module with the name of one of its members.
pub fn join_key(location: &str, name: &str) -> String {
    if location.is_empty() {
        name.to_string()
    } else {
        format!("{location}.{name}")
    }
}

pub trait SaveSafeTensors: Serializable {
    /// Collects the tensors of this module, keyed under `location`.
    fn write_safetensors(&self, location: &str, tensors: &mut Vec<SafeTensorEntry>);

    /// Serializes into the [safetensors](https://github.com/huggingface/safetensors) format.
    fn to_safetensors_bytes(&self) -> Result<Vec<u8>, Error> {
        if !self.is_serializable() {
            return Err(Error::NotSerializable(
                std::any::type_name::<Self>().to_string(),
            ));
        }
        let mut tensors = Vec::new();
        self.write_safetensors("", &mut tensors);
        let views = tensors
            .iter()
            .map(|(k, dtype, shape, data)| {
                let view = safetensors::tensor::TensorView::new(*dtype, shape.clone(), data)?;
                Ok((k.clone(), view))
            })
            .collect::<Result<Vec<_>, safetensors::SafeTensorError>>()?;
        let views = views.iter().map(|(k, v)| (k.clone(), v)).collect::<Vec<_>>();
        Ok(safetensors::serialize(views, &None)?)
    }

    /// Save this object into the [safetensors](https://github.com/huggingface/safetensors) format.
    ///
    /// ```rust,ignore
    /// model.save_safetensors("model.safetensors").unwrap();
    /// ```
    fn save_safetensors<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let bytes = self.to_safetensors_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        tracing::debug!(path = %path.as_ref().display(), "saved safetensors");
        Ok(())
    }
}

pub trait LoadSafeTensors: Serializable {
    /// Reads the tensors of this module, keyed under `location`.
    fn read_safetensors(
        &mut self,
        location: &str,
        tensors: &safetensors::SafeTensors,
    ) -> Result<(), Error>;

    fn load_safetensors_from_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if !self.is_serializable() {
            return Err(Error::NotSerializable(
                std::any::type_name::<Self>().to_string(),
            ));
        }
        let tensors = safetensors::SafeTensors::deserialize(bytes)?;
        self.read_safetensors("", &tensors)
    }

    /// Loads data from a [safetensors](https://github.com/huggingface/safetensors) file.
    fn load_safetensors<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let f = std::fs::File::open(path.as_ref())?;
        // SAFETY: the mapping is only read, and only for the duration of this call
        let buffer = unsafe { memmap2::MmapOptions::new().map(&f)? };
        tracing::debug!(path = %path.as_ref().display(), bytes = buffer.len(), "loading safetensors");
        self.load_safetensors_from_bytes(&buffer)
    }
}

/// Writes `module` under `key` unless it opted out of serialization.
pub fn write_member<M: SaveSafeTensors + ?Sized>(
    module: &M,
    key: &str,
    tensors: &mut Vec<SafeTensorEntry>,
) {
    if module.is_serializable() {
        module.write_safetensors(key, tensors);
    } else {
        tracing::debug!(key, "skipping non-serializable module");
    }
}

/// Reads `module` from `key` unless it opted out of serialization.
pub fn read_member<M: LoadSafeTensors + ?Sized>(
    module: &mut M,
    key: &str,
    tensors: &safetensors::SafeTensors,
) -> Result<(), Error> {
    if module.is_serializable() {
        module.read_safetensors(key, tensors)
    } else {
        tracing::debug!(key, "skipping non-serializable module");
        Ok(())
    }
}

impl<E: Dtype> Serializable for Tensor<E> {}

impl<E: Dtype> SaveSafeTensors for Tensor<E> {
    fn write_safetensors(&self, location: &str, tensors: &mut Vec<SafeTensorEntry>) {
        tensors.push(self.to_safetensor_entry(location));
    }
}

impl<E: Dtype> LoadSafeTensors for Tensor<E> {
    fn read_safetensors(
        &mut self,
        location: &str,
        tensors: &safetensors::SafeTensors,
    ) -> Result<(), Error> {
        self.load_safetensor(tensors, location)
    }
}

/// Something that can be built on a device. Architecture descriptions like
/// `LinearConfig` build into modules with parameters; stateless modules
/// build into themselves.
pub trait BuildOnDevice<E: Dtype>: Clone {
    type Built: Clone + std::fmt::Debug;
    fn build_on_device(&self, device: &Cpu) -> Self::Built {
        self.try_build_on_device(device).unwrap()
    }
    fn try_build_on_device(&self, device: &Cpu) -> Result<Self::Built, Error>;
}

/// Extension method to build and reset a module in one call.
pub trait BuildModuleExt<M> {
    fn build_module<E: Dtype>(&self, m: M) -> M::Built
    where
        M: BuildOnDevice<E>,
        M::Built: ResetParams,
    {
        self.try_build_module(m).unwrap()
    }

    fn try_build_module<E: Dtype>(&self, m: M) -> Result<M::Built, Error>
    where
        M: BuildOnDevice<E>,
        M::Built: ResetParams;
}

impl<M> BuildModuleExt<M> for Cpu {
    fn try_build_module<E: Dtype>(&self, m: M) -> Result<M::Built, Error>
    where
        M: BuildOnDevice<E>,
        M::Built: ResetParams,
    {
        let mut module = m.try_build_on_device(self)?;
        module.try_reset_params()?;
        tracing::debug!(module = std::any::type_name::<M::Built>(), "built module");
        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn test_join_key() {
        assert_eq!(join_key("", "weight"), "weight");
        assert_eq!(join_key("0", "weight"), "0.weight");
        assert_eq!(join_key("a.1", "2"), "a.1.2");
    }

    #[test]
    fn test_tensor_save_load() {
        let dev: TestDevice = Default::default();
        let a: Tensor<TestDtype> = dev.tensor([[1.0, 2.0], [3.0, 4.0]]);
        let bytes = a.to_safetensors_bytes().unwrap();

        let mut b: Tensor<TestDtype> = dev.zeros(&[2, 2]);
        b.load_safetensors_from_bytes(&bytes).unwrap();
        assert_eq!(a, b);

        let mut c: Tensor<TestDtype> = dev.zeros(&[4]);
        assert!(matches!(
            c.load_safetensors_from_bytes(&bytes),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_tensor_save_load_file() {
        let dev: TestDevice = Default::default();
        let a: Tensor<TestDtype> = dev.sample_uniform(&[3, 2], -1.0, 1.0);
        let file = tempfile::NamedTempFile::new().expect("failed to create tempfile");
        a.save_safetensors(file.path()).unwrap();

        let mut b: Tensor<TestDtype> = dev.zeros(&[3, 2]);
        b.load_safetensors(file.path()).unwrap();
        assert_eq!(a, b);
    }

    #[derive(Clone, Debug, Default)]
    struct Opaque;

    impl Serializable for Opaque {
        fn is_serializable(&self) -> bool {
            false
        }
    }

    impl SaveSafeTensors for Opaque {
        fn write_safetensors(&self, _: &str, _: &mut Vec<SafeTensorEntry>) {}
    }

    #[test]
    fn test_top_level_not_serializable() {
        let err = Opaque.to_safetensors_bytes().unwrap_err();
        assert!(matches!(err, Error::NotSerializable(_)));
    }

    #[test]
    fn test_pretty_print_children_indents_nested() {
        struct Leaf;
        impl PrettyPrint for Leaf {
            fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
                write!(f, "Leaf()")
            }
        }
        struct Node;
        impl PrettyPrint for Node {
            fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
                pretty_print_children(
                    f,
                    "Node",
                    [Leaf.try_pretty_string(), Leaf.try_pretty_string()],
                )
            }
        }

        let mut s = String::new();
        pretty_print_children(
            &mut s,
            "Root",
            [Leaf.try_pretty_string(), Node.try_pretty_string()],
        )
        .unwrap();
        assert_eq!(
            s,
            "Root(\n  (0): Leaf()\n  (1): Node(\n    (0): Leaf()\n    (1): Leaf()\n  )\n)"
        );
    }

    #[test]
    fn test_pretty_print_children_stops_at_failed_child() {
        let mut s = String::new();
        let children = [Ok("A()".to_string()), Err(std::fmt::Error), Ok("C()".to_string())];
        assert!(pretty_print_children(&mut s, "Root", children).is_err());
        assert!(!s.contains("C()"));
    }
}
