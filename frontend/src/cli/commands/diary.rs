//! Diary handlers

use anyhow::{bail, Result};
use me_bau::services::date_utils::format_service_timestamp;
use me_bau::state::DiaryState;
use me_bau::{ApiError, UserAlert};

use super::{finish, Context};
use crate::cli::args::DiaryAction;

pub async fn run(ctx: &Context, action: DiaryAction) -> Result<()> {
    let mut state = DiaryState::new();
    match action {
        DiaryAction::List => {
            state.load(&ctx.api, &ctx.session).await;
            print_list(&state);
        }
        DiaryAction::Add { title, content } => {
            state.begin_add();
            state.new_title = title;
            state.new_content = content;
            match state.add(&ctx.api, &ctx.session).await {
                Ok(Some(created)) => {
                    println!("✓ Đã thêm nhật ký {} ({})", created.title, created.id)
                }
                Ok(None) => bail!("Vui lòng nhập tiêu đề và nội dung"),
                Err(e) => return fail(&e),
            }
        }
        DiaryAction::Edit { id, title, content } => {
            state.load(&ctx.api, &ctx.session).await;
            if !state.begin_edit(&id) {
                bail!("Không tìm thấy nhật ký '{id}'");
            }
            if let Some(title) = title {
                state.set_edit_title(title);
            }
            if let Some(content) = content {
                state.set_edit_content(content);
            }
            if let Err(e) = state.save_edit(&ctx.api, &ctx.session).await {
                return fail(&e);
            }
            println!("✓ Đã cập nhật nhật ký {id}");
        }
        DiaryAction::Delete { id } => {
            if let Err(e) = state.delete(&ctx.api, &ctx.session, &id).await {
                return fail(&e);
            }
            println!("✓ Đã xóa nhật ký {id}");
        }
    }
    Ok(())
}

fn fail(err: &ApiError) -> Result<()> {
    finish(&UserAlert::from_api_error(err))
}

fn print_list(state: &DiaryState) {
    if state.diaries.is_empty() {
        println!("Chưa có nhật ký nào");
        return;
    }
    for entry in &state.diaries {
        let created = format_service_timestamp(&entry.created_at);
        println!("\n[{}] {} · {}", entry.id, entry.title, created);
        println!("{}", entry.content);
    }
}
