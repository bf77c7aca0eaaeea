use crate::{
    dtypes::Dtype,
    nn_traits::{join_key, pretty_print_children, read_member, write_member, PrettyPrint as _},
    tensor::{Cpu, Error, SafeTensorEntry},
};

macro_rules! tuple_impls {
    ([$($name:ident),+] [$($idx:tt),+], $last:ident, [$($rev_tail:ident),*]) => {

        impl<Elem: Dtype, $($name: crate::nn_traits::BuildOnDevice<Elem>),+> crate::nn_traits::BuildOnDevice<Elem> for ($($name,)+) {
            type Built = ($($name::Built, )+);
            fn try_build_on_device(&self, device: &Cpu) -> Result<Self::Built, Error> {
                Ok(($(
                    self.$idx.try_build_on_device(device)?,
                )+))
            }
        }

        impl<$($name: crate::nn_traits::Serializable, )+> crate::nn_traits::Serializable for ($($name,)+) {}

        impl<$($name: crate::nn_traits::SaveSafeTensors, )+> crate::nn_traits::SaveSafeTensors for ($($name,)+) {
            fn write_safetensors(&self, location: &str, tensors: &mut Vec<SafeTensorEntry>) {
                $(
                    write_member(&self.$idx, &join_key(location, stringify!($idx)), tensors);
                )+
            }
        }

        impl<$($name: crate::nn_traits::LoadSafeTensors, )+> crate::nn_traits::LoadSafeTensors for ($($name,)+) {
            fn read_safetensors(
                &mut self,
                location: &str,
                tensors: &safetensors::SafeTensors,
            ) -> Result<(), Error> {
                $(
                    read_member(&mut self.$idx, &join_key(location, stringify!($idx)), tensors)?;
                )+
                Ok(())
            }
        }

        impl<$($name: crate::nn_traits::ResetParams),+> crate::nn_traits::ResetParams for ($($name,)+) {
            fn try_reset_params(&mut self) -> Result<(), Error> {
                $(self.$idx.try_reset_params()?;)+
                Ok(())
            }
        }

        impl<$($name: crate::nn_traits::PrettyPrint),+> crate::nn_traits::PrettyPrint for ($($name,)+) {
            fn pretty_print(&self, f: &mut dyn std::fmt::Write) -> std::fmt::Result {
                pretty_print_children(f, "Sequential", [$(self.$idx.try_pretty_string(),)+])
            }
        }

        // Each member consumes the output of the one before it. `$rev_tail`
        // lists the members in reverse, so for `(M1, M2, M3)` the bounds read
        // `M3: Module<M2::Output>, M2: Module<M1::Output>, M1: Module<Input>`.
        impl<
            Input,
            $last:
            $(crate::nn_traits::Module::<$rev_tail ::Output>, $rev_tail: )*
            crate::nn_traits::Module<Input>
        > crate::nn_traits::Module<Input> for ($($name,)+) {
            type Output = $last ::Output;

            /// Calls forward sequentially on each module in the tuple.
            fn try_forward(&self, x: Input) -> Result<Self::Output, Error> {
                $(let x = self.$idx.try_forward(x)?;)+
                Ok(x)
            }

            /// Calls forward sequentially on each module in the tuple.
            fn try_forward_mut(&mut self, x: Input) -> Result<Self::Output, Error> {
                $(let x = self.$idx.try_forward_mut(x)?;)+
                Ok(x)
            }
        }
    };
}

tuple_impls!([M1][0], M1, []);
tuple_impls!([M1, M2] [0, 1], M2, [M1]);
tuple_impls!([M1, M2, M3] [0, 1, 2], M3, [M2, M1]);
tuple_impls!([M1, M2, M3, M4] [0, 1, 2, 3], M4, [M3, M2, M1]);
tuple_impls!([M1, M2, M3, M4, M5] [0, 1, 2, 3, 4], M5, [M4, M3, M2, M1]);
tuple_impls!([M1, M2, M3, M4, M5, M6] [0, 1, 2, 3, 4, 5], M6, [M5, M4, M3, M2, M1]);
