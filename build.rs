use shadow_rs::SdResult;
use std::fs::File;
use std::io::Write;
use std::process::Command;

fn main() -> SdResult<()> {
    shadow_rs::new_hook(hook)
}

fn hook(file: &File) -> SdResult<()> {
    append_write_const(file)?;
    Ok(())
}

fn git_output(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .and_then(|x| String::from_utf8(x.stdout).ok())
        .map(|x| x.trim().to_string())
}

fn append_write_const(mut file: &File) -> SdResult<()> {
    let hash = git_output(&["rev-parse", "HEAD"]);
    let short_hash = git_output(&["rev-parse", "--short", "HEAD"]);

    writeln!(
        file,
        "pub const GHA_COMMIT_HASH: &str = \"{}\";\npub const GHA_COMMIT_HASH_SHORT: &str = \"{}\";",
        hash.unwrap_or_default(),
        short_hash.unwrap_or_default(),
    )?;
    Ok(())
}
