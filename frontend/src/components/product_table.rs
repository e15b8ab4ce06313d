use crate::api::use_api;
use crate::auth::use_session;
use crate::catalog::{EditBuffer, EditField, Outcome, PageSize, ProductListController};
use crate::components::icons::*;
use crate::session::BrowserSessionStore;
use crate::web::dialog;
use crate::web::http::FetchClient;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

type Controller = ProductListController<FetchClient, BrowserSessionStore>;

/// 把需要提示的结果弹窗告知用户
fn report(outcome: Outcome) {
    if let Some(message) = outcome.alert() {
        dialog::alert(&message);
    }
}

#[component]
pub fn ProductListPage() -> impl IntoView {
    let session = use_session();
    let controller = StoredValue::new(ProductListController::new(use_api(), session));
    let state = controller.with_value(|c| c.state());
    let show_actions = controller.with_value(|c| c.actions_signal());

    // 刷新键变化时重新拉取；过期响应由控制器丢弃
    let refresh_key = Memo::new(move |_| controller.with_value(|c| c.refresh_key()));
    Effect::new(move |_| {
        if refresh_key.with(Option::is_none) {
            return;
        }
        let c = controller.get_value();
        spawn_local(async move {
            report(c.refresh().await);
        });
    });

    let row_ids = move || {
        state.with(|s| {
            s.visible()
                .iter()
                .map(|p| p.id.clone())
                .collect::<Vec<_>>()
        })
    };
    let is_loading = move || state.with(|s| s.is_loading());
    let is_empty = move || state.with(|s| s.products().is_empty());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex flex-wrap items-center justify-between gap-4 p-6 pb-2">
                    <div>
                        <h3 class="card-title">"Products"</h3>
                        <p class="text-base-content/70 text-sm">"Search the catalog by name."</p>
                    </div>
                    <label class="input input-bordered flex items-center gap-2">
                        <Search attr:class="h-4 w-4 opacity-70" />
                        <input
                            type="search"
                            class="grow"
                            placeholder="Search products"
                            prop:value=move || state.with(|s| s.search().to_string())
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                controller.with_value(|c| c.set_search(text));
                            }
                        />
                    </label>
                </div>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Price"</th>
                                <th>"Category"</th>
                                <th>"In Stock"</th>
                                {move || show_actions.get().then(|| view! { <th>"Actions"</th> })}
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || is_empty() && !is_loading()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        "No products found."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || is_empty() && is_loading()>
                                <tr>
                                    <td colspan="5" class="text-center py-8">
                                        <span class="loading loading-spinner loading-md"></span>
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=row_ids
                                key=|id| id.clone()
                                children=move |id| {
                                    view! { <ProductRow id=id controller=controller show_actions=show_actions /> }
                                }
                            />
                        </tbody>
                    </table>
                </div>

                <PaginationBar controller=controller />
            </div>
        </div>
    }
}

/// 单行：`Viewing` 显示文本，`Editing` 显示输入框
///
/// 行内容与编辑状态各自是一个 Memo，输入时只更新输入框本身，不会重建整行导致失焦。
#[component]
fn ProductRow(
    id: String,
    controller: StoredValue<Controller>,
    show_actions: Signal<bool>,
) -> impl IntoView {
    let state = controller.with_value(|c| c.state());
    let product = Memo::new({
        let id = id.clone();
        move |_| state.with(|s| s.product(&id).cloned())
    });
    let editing = Memo::new({
        let id = id.clone();
        move |_| state.with(|s| s.is_editing(&id))
    });

    let shown = move |f: fn(&catalog_shared::Product) -> String| {
        product.with(|p| p.as_ref().map(f).unwrap_or_default())
    };
    let buffered = move |f: fn(&EditBuffer) -> String| {
        state.with(|s| s.edit_buffer().map(f).unwrap_or_default())
    };
    let is_dirty = move || state.with(|s| s.edit_buffer().is_some_and(EditBuffer::is_dirty));
    let edit = move |field: EditField| controller.with_value(|c| c.update_edit(field));

    let name_cell = move || {
        if editing.get() {
            view! {
                <input
                    class="input input-bordered input-sm w-full"
                    prop:value=move || buffered(|b| b.name.clone())
                    on:input=move |ev| edit(EditField::Name(event_target_value(&ev)))
                />
            }
            .into_any()
        } else {
            view! { <span class="font-medium">{move || shown(|p| p.name.clone())}</span> }.into_any()
        }
    };

    let price_error = move || {
        state.with(|s| {
            s.edit_buffer()
                .and_then(EditBuffer::price_error)
                .map(|e| e.to_string())
        })
    };
    let price_cell = move || {
        if editing.get() {
            view! {
                <input
                    class=move || if price_error().is_some() {
                        "input input-bordered input-sm input-error w-28"
                    } else {
                        "input input-bordered input-sm w-28"
                    }
                    inputmode="decimal"
                    prop:value=move || buffered(|b| b.price.clone())
                    on:input=move |ev| edit(EditField::Price(event_target_value(&ev)))
                />
                <div class="text-error text-xs mt-1">{price_error}</div>
            }
            .into_any()
        } else {
            view! { <span>{move || shown(|p| p.price.to_string())}</span> }.into_any()
        }
    };

    let category_cell = move || {
        if editing.get() {
            view! {
                <input
                    class="input input-bordered input-sm w-full"
                    prop:value=move || buffered(|b| b.category.clone())
                    on:input=move |ev| edit(EditField::Category(event_target_value(&ev)))
                />
            }
            .into_any()
        } else {
            view! { <span>{move || shown(|p| p.category.clone())}</span> }.into_any()
        }
    };

    let stock_cell = move || {
        if editing.get() {
            view! {
                <input
                    type="checkbox"
                    class="checkbox checkbox-sm"
                    prop:checked=move || state.with(|s| s.edit_buffer().is_some_and(|b| b.in_stock))
                    on:change=move |ev| edit(EditField::InStock(event_target_checked(&ev)))
                />
            }
            .into_any()
        } else {
            let in_stock = move || product.with(|p| p.as_ref().is_some_and(|p| p.in_stock));
            view! {
                <span class=move || if in_stock() { "badge badge-success" } else { "badge badge-ghost" }>
                    {move || if in_stock() { "Yes" } else { "No" }}
                </span>
            }
            .into_any()
        }
    };

    let actions_cell = move || {
        let id = id.clone();
        if editing.get() {
            let on_save = move |_| {
                let c = controller.get_value();
                spawn_local(async move {
                    report(c.save().await);
                });
            };
            let on_cancel = move |_| controller.with_value(|c| c.cancel_edit());
            view! {
                <div class="flex gap-1">
                    <button class=move || if is_dirty() { "btn btn-sm btn-primary gap-1" } else { "btn btn-sm btn-outline gap-1" } on:click=on_save>
                        <Save attr:class="h-4 w-4" /> "Save"
                    </button>
                    <button class="btn btn-sm btn-ghost gap-1" on:click=on_cancel>
                        <X attr:class="h-4 w-4" /> "Cancel"
                    </button>
                </div>
            }
            .into_any()
        } else {
            let edit_id = id.clone();
            let on_edit = move |_| {
                if let Err(e) = controller.with_value(|c| c.enter_edit(&edit_id)) {
                    warn!("[Catalog] cannot edit {}: {}", edit_id, e);
                    dialog::alert(&e.to_string());
                }
            };
            let on_delete = move |_| {
                let c = controller.get_value();
                let id = id.clone();
                spawn_local(async move {
                    report(c.delete(id).await);
                });
            };
            view! {
                <div class="flex gap-1">
                    <button class="btn btn-sm btn-ghost gap-1" on:click=on_edit>
                        <Pencil attr:class="h-4 w-4" /> "Edit"
                    </button>
                    <button class="btn btn-sm btn-ghost text-error gap-1" on:click=on_delete>
                        <Trash2 attr:class="h-4 w-4" /> "Delete"
                    </button>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <tr>
            <td>{name_cell}</td>
            <td>{price_cell}</td>
            <td>{category_cell}</td>
            <td>{stock_cell}</td>
            {move || show_actions.get().then(|| view! { <td>{actions_cell.clone()}</td> })}
        </tr>
    }
}

/// 分页栏：每页行数选择 + 上一页/下一页
#[component]
fn PaginationBar(controller: StoredValue<Controller>) -> impl IntoView {
    let state = controller.with_value(|c| c.state());
    let page = move || state.with(|s| s.page());
    let page_count = move || state.with(|s| s.page_count());
    let range_label = move || {
        state.with(|s| {
            let (start, end) = s.visible_range();
            format!("{}–{} of {}", start, end, s.products().len())
        })
    };

    let on_size = move |ev: leptos::ev::Event| {
        let size = event_target_value(&ev)
            .parse::<usize>()
            .ok()
            .and_then(PageSize::from_rows);
        if let Some(size) = size {
            state.update(|s| s.set_page_size(size));
        }
    };

    view! {
        <div class="flex flex-wrap items-center justify-end gap-4 p-4 text-sm">
            <label class="flex items-center gap-2">
                "Rows per page:"
                <select
                    class="select select-bordered select-sm"
                    on:change=on_size
                    prop:value=move || state.with(|s| s.page_size().rows().to_string())
                >
                    {PageSize::ALL
                        .into_iter()
                        .map(|size| {
                            let value = size.rows().to_string();
                            let label = value.clone();
                            view! { <option value=value>{label}</option> }
                        })
                        .collect_view()}
                </select>
            </label>
            <span>{range_label}</span>
            <div class="join">
                <button
                    class="join-item btn btn-sm"
                    disabled=move || page() == 0
                    on:click=move |_| state.update(|s| s.set_page(s.page().saturating_sub(1)))
                >
                    <ChevronLeft attr:class="h-4 w-4" />
                </button>
                <button
                    class="join-item btn btn-sm"
                    disabled=move || page() + 1 >= page_count()
                    on:click=move |_| state.update(|s| s.set_page(s.page() + 1))
                >
                    <ChevronRight attr:class="h-4 w-4" />
                </button>
            </div>
        </div>
    }
}
