//! Login, logout, profile and registration handlers

use anyhow::{bail, Result};
use me_bau::domain::validation::RegisterForm;
use me_bau::error::NOT_SIGNED_IN;
use me_bau::services::date_utils::format_display_date;
use me_bau::state::{FillInfoForm, LoginState, RegisterState};
use shared::UserProfile;

use super::{finish, Context};
use crate::cli::args::ProfileAction;

pub async fn login(ctx: &Context, email: String, password: String) -> Result<()> {
    let mut state = LoginState {
        email,
        password,
        ..LoginState::new()
    };
    let alert = state.login(&ctx.api, &ctx.session).await;
    finish(&alert)?;
    if let Some(user) = &state.user {
        print_profile(user);
    }
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    let mut state = LoginState::new();
    state.logout(&ctx.session).await?;
    println!("✓ Đã đăng xuất");
    Ok(())
}

pub async fn profile(ctx: &Context, action: Option<ProfileAction>) -> Result<()> {
    let mut state = LoginState::new();
    state.restore(&ctx.api, &ctx.session).await;
    if !state.logged_in {
        bail!(NOT_SIGNED_IN);
    }

    match action.unwrap_or(ProfileAction::Show) {
        ProfileAction::Show => match &state.user {
            Some(user) => print_profile(user),
            None => bail!("Không thể tải thông tin người dùng"),
        },
        ProfileAction::Update {
            name,
            due_date,
            week,
            baby_name,
            gender,
        } => {
            state.begin_edit();
            let form = &mut state.profile_form;
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(due_date) = due_date {
                form.due_date = due_date;
            }
            if let Some(week) = week {
                form.pregnancy_week = week;
            }
            if let Some(baby_name) = baby_name {
                form.baby_name = baby_name;
            }
            if let Some(gender) = gender {
                form.baby_gender = gender;
            }

            let outcome = state.update_profile(&ctx.api, &ctx.session).await;
            finish(&outcome.alert)?;
            if let Some(user) = &state.user {
                print_profile(user);
            }
        }
    }
    Ok(())
}

pub async fn fill_info(
    ctx: &Context,
    due_date: String,
    baby_name: String,
    gender: String,
    week: String,
) -> Result<()> {
    let form = FillInfoForm {
        due_date,
        baby_name,
        gender,
        pregnancy_week: week,
    };
    let outcome = form.submit(&ctx.api, &ctx.session).await;
    finish(&outcome.alert)
}

pub fn register(
    username: String,
    email: String,
    password: String,
    confirm_password: String,
    accept_terms: bool,
) -> Result<()> {
    let state = RegisterState {
        form: RegisterForm {
            username,
            email,
            password,
            confirm_password,
            accept_terms,
        },
        ..RegisterState::default()
    };
    finish(&state.submit())
}

fn print_profile(user: &UserProfile) {
    println!("\n=== Hồ sơ ===\n");
    println!("Họ tên:        {}", user.name);
    println!("Email:         {}", user.email);
    match user.due_date {
        Some(date) => println!("Ngày dự sinh:  {}", format_display_date(date)),
        None => println!("Ngày dự sinh:  -"),
    }
    match user.pregnancy_week {
        Some(week) => println!("Tuần thai:     {week}"),
        None => println!("Tuần thai:     -"),
    }
    println!("Tên bé:        {}", user.baby_name());
    match user.baby_gender() {
        Some(gender) => println!("Giới tính bé:  {gender}"),
        None => println!("Giới tính bé:  -"),
    }
}
