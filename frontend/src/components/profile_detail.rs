use crate::api::use_api;
use crate::components::icons::UserRound;
use crate::profile::{ProfileView, join_list, load_profile};
use catalog_shared::Profile;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 个人资料页
///
/// 路由标识符变化时路由出口会重建本组件，因此每个标识符只拉取一次。
#[component]
pub fn ProfilePage(id: String) -> impl IntoView {
    let api = use_api();
    let profile = RwSignal::new(ProfileView::Loading);

    spawn_local(async move {
        let loaded = load_profile(&api, &id).await;
        // 组件可能已被卸载
        let _ = profile.try_set(loaded);
    });

    view! {
        <div class="card bg-base-100 shadow-xl max-w-2xl mx-auto">
            <div class="card-body">
                {move || match profile.get() {
                    ProfileView::Loading => view! {
                        <div class="flex justify-center py-8">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                    .into_any(),
                    ProfileView::Failed(message) => view! {
                        <div role="alert" class="alert alert-warning">
                            <span>{message}</span>
                        </div>
                    }
                    .into_any(),
                    ProfileView::Ready(p) => view! { <ProfileDetail profile=p /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn ProfileDetail(profile: Profile) -> impl IntoView {
    let interests = join_list(&profile.interests);
    let achievements = join_list(&profile.achievements);

    view! {
        <div class="flex items-center gap-3 mb-4">
            <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                <UserRound attr:class="h-8 w-8" />
            </div>
            <h2 class="card-title text-2xl">{profile.name}</h2>
        </div>

        <Section title="Personal Info">
            <Field label="Email" value=profile.email />
            <Field label="Phone" value=profile.phone />
        </Section>
        <Section title="Education">
            <Field label="Degree" value=profile.degree />
            <Field label="Institution" value=profile.institution />
            <Field label="Year" value=profile.year />
        </Section>
        <Section title="Interests">
            <p>{interests}</p>
        </Section>
        <Section title="Achievements">
            <p>{achievements}</p>
        </Section>
    }
}

#[component]
fn Section(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <section class="mb-4">
            <h3 class="font-semibold text-lg border-b border-base-300 mb-2">{title}</h3>
            {children()}
        </section>
    }
}

#[component]
fn Field(label: &'static str, value: String) -> impl IntoView {
    view! {
        <p>
            <span class="text-base-content/70">{label} ": "</span>
            {value}
        </p>
    }
}
