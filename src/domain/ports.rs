/// Something that can hand out a sequence of text values on demand.
pub trait TextSource {
    type Iter: Iterator<Item = String>;

    fn iterator(&self) -> Self::Iter;
}
