use vergen_gitcl::{Emitter, GitclBuilder};

fn main() -> anyhow::Result<()> {
    // Outside of a git checkout the variables are emitted with placeholder values.
    let git = GitclBuilder::default().sha(true).branch(true).build()?;

    Emitter::default().add_instructions(&git)?.emit()?;

    Ok(())
}
