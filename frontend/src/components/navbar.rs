use crate::auth::{logout, use_session};
use crate::components::icons::{LogOut, Package};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let is_authenticated = session.is_authenticated_signal();
    let role = {
        let signal = session.session_signal();
        move || {
            signal.with(|s| {
                s.as_ref()
                    .map(|s| s.role.as_str().to_string())
                    .unwrap_or_default()
            })
        }
    };

    let on_logout = move |_| logout(&session);

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1 gap-2">
                <Package attr:class="text-primary h-6 w-6" />
                <Link to=AppRoute::Home class="btn btn-ghost text-xl">
                    "Product Catalog"
                </Link>
            </div>
            <div class="flex-none gap-2">
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| view! {
                        <Link to=AppRoute::Home class="btn btn-ghost">"Login"</Link>
                        <Link to=AppRoute::Register class="btn btn-primary">"Register"</Link>
                    }
                >
                    <span class="badge badge-neutral">{role}</span>
                    <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </Show>
            </div>
        </div>
    }
}
