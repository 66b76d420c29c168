//! Screw length reference data and the diameter/length calculator.

use argip_api_models::projection::{distinct_diameters, lengths_for};
use argip_api_models::{ScrewLength, ScrewLengthCreate, validation};

use crate::cli::{DeleteArgs, LengthsArgs, ScrewCreateArgs};
use crate::client::{AppContext, CliResult};
use crate::commands::require_login;
use crate::output::{render_diameters, render_screws};
use crate::prompt::confirm_delete;

pub(crate) async fn handle_list(ctx: &AppContext) -> CliResult<()> {
    require_login(ctx)?;
    let screws = ctx.api.list_screw_lengths().await?;
    render_screws(&screws, ctx.output)
}

pub(crate) async fn handle_create(ctx: &AppContext, args: ScrewCreateArgs) -> CliResult<()> {
    require_login(ctx)?;
    let payload = ScrewLengthCreate {
        srednica: args.diameter,
        dlugosc: args.length,
    };
    payload.validate()?;

    let screw = ctx.api.create_screw_length(&payload).await?;
    println!(
        "Created screw {} (⌀{} mm × {} mm).",
        screw.id, screw.srednica, screw.dlugosc
    );
    Ok(())
}

pub(crate) async fn handle_delete(ctx: &AppContext, args: DeleteArgs) -> CliResult<()> {
    require_login(ctx)?;
    let question = format!("Delete screw length {}?", args.id);
    if !confirm_delete(ctx.confirm.as_ref(), args.yes, &question)? {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.api.delete_screw_length(args.id).await?;
    println!("Deleted screw length {}.", args.id);
    Ok(())
}

pub(crate) async fn handle_diameters(ctx: &AppContext) -> CliResult<()> {
    require_login(ctx)?;
    let screws = ctx.api.list_screw_lengths().await?;
    render_diameters(&distinct_diameters(&screws), ctx.output)
}

pub(crate) async fn handle_lengths(ctx: &AppContext, args: LengthsArgs) -> CliResult<()> {
    require_login(ctx)?;
    validation::ensure_positive("srednica", args.diameter)?;
    let screws = ctx.api.list_screw_lengths().await?;
    let matching: Vec<ScrewLength> = lengths_for(&screws, args.diameter)
        .into_iter()
        .cloned()
        .collect();
    render_screws(&matching, ctx.output)
}
