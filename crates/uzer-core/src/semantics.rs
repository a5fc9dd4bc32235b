/// High-level semantic role of a laid-out node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Text,
    Image,
    /// A container that only carries a test tag.
    Container,
}
