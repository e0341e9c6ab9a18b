use std::{fs, os::unix::fs::PermissionsExt, path::Path, path::PathBuf};

/// Writes an executable shell script standing in for the schema-change tool.
/// It appends its arguments, one per line followed by `---`, to
/// `invocations.log` next to itself, answers `--dry-run` with `probe_stdout`,
/// and exits with `execute_status` for `--execute`.
pub fn write_fake_tool(dir: &Path, probe_stdout: &str, execute_status: i32) -> PathBuf {
    let path = dir.join("fake-osc");
    let log = dir.join("invocations.log");
    let script = format!(
        "#!/bin/sh\n\
         printf '%s\\n' \"$@\" >> '{log}'\n\
         echo '---' >> '{log}'\n\
         if [ \"$1\" = \"--dry-run\" ]; then\n\
         cat <<'PROBE'\n{probe_stdout}\nPROBE\n\
         exit 0\n\
         fi\n\
         if [ {execute_status} -ne 0 ]; then\n\
         echo 'Error altering new table' >&2\n\
         fi\n\
         exit {execute_status}\n",
        log = log.display(),
    );

    install_script(&path, &script);
    path
}

/// A tool whose `--dry-run` prints its full argument list to stderr and exits
/// 1, and whose `--execute` echoes the same list to stdout and succeeds.
#[allow(dead_code)]
pub fn write_echoing_fake_tool(dir: &Path) -> PathBuf {
    let path = dir.join("fake-osc");
    let log = dir.join("invocations.log");
    let script = format!(
        "#!/bin/sh\n\
         printf '%s\\n' \"$@\" >> '{log}'\n\
         echo '---' >> '{log}'\n\
         if [ \"$1\" = \"--dry-run\" ]; then\n\
         echo \"Cannot connect with $*\" >&2\n\
         exit 1\n\
         fi\n\
         echo \"Altering with $*\"\n\
         exit 0\n",
        log = log.display(),
    );

    install_script(&path, &script);
    path
}

fn install_script(path: &Path, script: &str) {
    fs::write(path, script).unwrap_or_else(|error| panic!("failed to write fake tool: {error}"));
    let mut permissions = fs::metadata(path)
        .unwrap_or_else(|error| panic!("failed to stat fake tool: {error}"))
        .permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)
        .unwrap_or_else(|error| panic!("failed to chmod fake tool: {error}"));
}

pub fn invocations(dir: &Path) -> Vec<Vec<String>> {
    let log = fs::read_to_string(dir.join("invocations.log"))
        .unwrap_or_else(|error| panic!("failed to read invocations log: {error}"));

    log.split("---\n")
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| chunk.lines().map(str::to_string).collect())
        .collect()
}
