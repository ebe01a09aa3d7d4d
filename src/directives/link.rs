//! `dir` and `files` directives.
use std::ffi::OsString;
use std::path::Path;

use super::Context;
use crate::config::expand::Token;
use crate::resources::fs::{ensure_dir, list_dir_names};
use crate::resources::path::join_bounded;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Resource as _, ResourceState};

/// Link the directory `src` into `dest`, named after the source's basename.
///
/// The host qualifier of `src` picks which source is linked but is not part
/// of the link name: `dir nvim:host ~/.config` creates `~/.config/nvim`.
pub fn link_dir(ctx: &mut Context, src: &Token, dest: &Token) {
    announce(ctx);

    let source = ctx.cwd.join(src.as_str());
    if !source.exists() {
        ctx.log
            .error(&format!("source not found: {}", source.display()));
        return;
    }

    let Some(name) = Path::new(src.unqualified()).file_name() else {
        ctx.log.error(&format!("cannot derive a link name from {src}"));
        return;
    };

    let dest_dir = ctx.cwd.join(dest.as_str());
    let target = join_bounded(&[dest_dir.as_path(), Path::new(name)]);
    place(ctx, &dest_dir, target.map(|t| SymlinkResource::new(source, t)));
}

/// Link every entry of the directory `src` into `dest` as a dotfile.
///
/// `files bash ~` links `bash/bashrc` to `~/.bashrc`. Entries are linked in
/// name order.
pub fn link_files(ctx: &mut Context, src: &Token, dest: &Token) {
    announce(ctx);

    let source_dir = ctx.cwd.join(src.as_str());
    let names = match list_dir_names(&source_dir) {
        Ok(names) => names,
        Err(e) => {
            ctx.log.error(&e.to_string());
            return;
        }
    };

    let dest_dir = ctx.cwd.join(dest.as_str());
    for name in names {
        let mut dotted = OsString::from(".");
        dotted.push(&name);
        let source = join_bounded(&[source_dir.as_path(), Path::new(&name)]);
        let target = join_bounded(&[dest_dir.as_path(), Path::new(&dotted)]);
        let resource = source
            .and_then(|s| target.map(|t| SymlinkResource::new(s, t)));
        place(ctx, &dest_dir, resource);
    }
}

/// Show the symlinking banner the first time any link directive runs.
fn announce(ctx: &mut Context) {
    if ctx.state.begin_symlinking() {
        ctx.log.stage("starting config symlinking");
    }
}

/// Replace whatever is at the resource's target with a fresh link and
/// update the counters.
fn place(
    ctx: &mut Context,
    dest_dir: &Path,
    resource: Result<SymlinkResource, crate::error::ResourceError>,
) {
    let resource = match resource {
        Ok(resource) => resource,
        Err(e) => {
            ctx.log.warn(&e.to_string());
            ctx.state.links_failed += 1;
            return;
        }
    };

    if ctx.dry_run {
        let note = match resource.current_state() {
            ResourceState::Correct => " (already linked)",
            ResourceState::Incorrect { .. } => " (replacing existing entry)",
            ResourceState::Missing => "",
            ResourceState::Invalid { reason } => {
                ctx.log
                    .warn(&format!("would not link {}: {reason}", resource.description()));
                return;
            }
        };
        ctx.log
            .dry_run(&format!("would link {}{note}", resource.description()));
        return;
    }

    let result = ensure_dir(dest_dir).and_then(|()| resource.apply());
    match result {
        Ok(()) => {
            ctx.state.links_succeeded += 1;
            ctx.log.info(&resource.description());
        }
        Err(e) => {
            ctx.state.links_failed += 1;
            ctx.log.warn(&e.to_string());
        }
    }
}
