use argip_api_models::{NutCreate, NutUpdate, Range, validation};

use crate::cli::{DeleteArgs, IdArgs, NutCreateArgs, NutListArgs, NutUpdateArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::require_login;
use crate::output::{render_nut, render_nuts};
use crate::prompt::confirm_delete;

/// Ranges are only needed to label table rows; JSON output carries raw ids.
async fn range_labels(ctx: &AppContext) -> CliResult<Vec<Range>> {
    match ctx.output {
        OutputFormat::Table => ctx.api.list_ranges().await,
        OutputFormat::Json => Ok(Vec::new()),
    }
}

pub(crate) async fn handle_list(ctx: &AppContext, args: NutListArgs) -> CliResult<()> {
    require_login(ctx)?;
    let nuts = ctx.api.list_nuts(args.range_id).await?;
    let ranges = range_labels(ctx).await?;
    render_nuts(&nuts, &ranges, ctx.output)
}

pub(crate) async fn handle_get(ctx: &AppContext, args: IdArgs) -> CliResult<()> {
    require_login(ctx)?;
    let nut = ctx.api.get_nut(args.id).await?;
    let ranges = range_labels(ctx).await?;
    render_nut(&nut, &ranges, ctx.output)
}

pub(crate) async fn handle_create(ctx: &AppContext, args: NutCreateArgs) -> CliResult<()> {
    require_login(ctx)?;
    let payload = NutCreate {
        id_zakresu: args.range_id,
        nazwa: args.name.trim().to_string(),
        srednica: args.diameter,
        cena: args.price,
    };
    payload.validate()?;

    let nut = ctx.api.create_nut(&payload).await?;
    println!("Created nut {} ({}).", nut.id, nut.nazwa);
    Ok(())
}

/// Flags are laid over the stored nut and the whole record is sent back.
pub(crate) async fn handle_update(ctx: &AppContext, args: NutUpdateArgs) -> CliResult<()> {
    require_login(ctx)?;
    let changes = NutUpdate {
        id_zakresu: args.range_id,
        nazwa: args.name.map(|name| name.trim().to_string()),
        srednica: args.diameter,
        cena: args.price,
    };
    if changes == NutUpdate::default() {
        return Err(CliError::validation(
            "nothing to update; pass --range-id, --name, --diameter or --price",
        ));
    }
    if let Some(nazwa) = &changes.nazwa {
        validation::ensure_name("nazwa", nazwa)?;
    }
    if let Some(srednica) = changes.srednica {
        validation::ensure_positive("srednica", srednica)?;
    }
    if let Some(cena) = changes.cena {
        validation::validate_price(cena)?;
    }

    let current = ctx.api.get_nut(args.id).await?;
    let merged = changes.apply(&current);
    merged.validate()?;

    let nut = ctx.api.update_nut(args.id, &NutUpdate::from(merged)).await?;
    println!("Updated nut {} ({}).", nut.id, nut.nazwa);
    Ok(())
}

pub(crate) async fn handle_delete(ctx: &AppContext, args: DeleteArgs) -> CliResult<()> {
    require_login(ctx)?;
    let question = format!("Delete nut {}?", args.id);
    if !confirm_delete(ctx.confirm.as_ref(), args.yes, &question)? {
        println!("Cancelled.");
        return Ok(());
    }
    ctx.api.delete_nut(args.id).await?;
    println!("Deleted nut {}.", args.id);
    Ok(())
}
