/// Strategy for displaying version information.
///
/// # Design
/// - Stateless: No internal state
#[derive(Debug, Clone, Copy)]
pub struct VersionStrategy;

impl super::CommandStrategy for VersionStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        println!("memsift {}", env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
