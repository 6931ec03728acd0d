/// Lifecycle a host screen exposes to whatever drives screen changes.
///
/// A placement screen owns one [`crate::PlacementRegistry`], built in
/// `setup` and dropped in `teardown`; nothing is reused across runs.
pub trait Screen {
    type Error;

    fn setup(&mut self) -> Result<(), Self::Error>;

    fn teardown(&mut self);
}
