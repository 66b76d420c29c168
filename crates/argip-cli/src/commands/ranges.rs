use argip_api_models::{RangeCreate, RangeUpdate, validation};

use crate::cli::{DeleteArgs, IdArgs, RangeCreateArgs, RangeUpdateArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::require_login;
use crate::output::{render_range, render_ranges};
use crate::prompt::confirm_delete;

pub(crate) async fn handle_list(ctx: &AppContext) -> CliResult<()> {
    require_login(ctx)?;
    let ranges = ctx.api.list_ranges().await?;
    render_ranges(&ranges, ctx.output)
}

pub(crate) async fn handle_get(ctx: &AppContext, args: IdArgs) -> CliResult<()> {
    require_login(ctx)?;
    let range = ctx.api.get_range(args.id).await?;
    render_range(&range, ctx.output)
}

pub(crate) async fn handle_create(ctx: &AppContext, args: RangeCreateArgs) -> CliResult<()> {
    require_login(ctx)?;
    let payload = RangeCreate {
        nazwa: args.name.trim().to_string(),
        od: args.od,
        do_: args.do_,
    };
    payload.validate()?;

    let range = ctx.api.create_range(&payload).await?;
    println!("Created range {} ({}).", range.id, range.nazwa);
    Ok(())
}

/// The stored range is fetched, the given flags are laid over it, and the whole
/// record is checked and sent back.
pub(crate) async fn handle_update(ctx: &AppContext, args: RangeUpdateArgs) -> CliResult<()> {
    require_login(ctx)?;
    let changes = RangeUpdate {
        nazwa: args.name.map(|name| name.trim().to_string()),
        od: args.od,
        do_: args.do_,
    };
    if changes == RangeUpdate::default() {
        return Err(CliError::validation(
            "nothing to update; pass --name, --od or --do",
        ));
    }
    if let Some(nazwa) = &changes.nazwa {
        validation::ensure_name("nazwa", nazwa)?;
    }

    let current = ctx.api.get_range(args.id).await?;
    let merged = changes.apply(&current);
    merged.validate()?;

    let range = ctx.api.update_range(args.id, &RangeUpdate::from(merged)).await?;
    println!("Updated range {} ({}).", range.id, range.nazwa);
    Ok(())
}

pub(crate) async fn handle_delete(ctx: &AppContext, args: DeleteArgs) -> CliResult<()> {
    require_login(ctx)?;
    let question = format!("Delete range {} and every nut in it?", args.id);
    if !confirm_delete(ctx.confirm.as_ref(), args.yes, &question)? {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.api.delete_range(args.id).await?;
    println!("Deleted range {}.", args.id);
    Ok(())
}
