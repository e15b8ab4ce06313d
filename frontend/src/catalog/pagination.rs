//! 客户端分页
//!
//! 纯粹是对已拉取列表的窗口切片，服务器端没有分页。

use std::ops::Range;

/// 每页行数（固定可选集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Ten,
        PageSize::TwentyFive,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub const fn rows(&self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }

    pub fn from_rows(rows: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.rows() == rows)
    }
}

/// 第 `page` 页（从 0 开始）对应的行区间
///
/// 越界的页返回空区间。
pub fn window(total: usize, page: usize, size: PageSize) -> Range<usize> {
    let start = page.saturating_mul(size.rows()).min(total);
    let end = start.saturating_add(size.rows()).min(total);
    start..end
}

/// 总页数，空列表也算一页
pub fn page_count(total: usize, size: PageSize) -> usize {
    total.div_ceil(size.rows()).max(1)
}

/// 将页码限制在有效范围内
pub fn clamp_page(page: usize, total: usize, size: PageSize) -> usize {
    page.min(page_count(total, size) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_shows_min_of_size_and_remainder() {
        for total in [0usize, 1, 9, 10, 11, 57, 100, 101] {
            for size in PageSize::ALL {
                let s = size.rows();
                for page in 0..page_count(total, size) + 1 {
                    let expected = s.min(total.saturating_sub(page * s));
                    assert_eq!(window(total, page, size).len(), expected);
                }
            }
        }
    }

    #[test]
    fn pages_partition_the_list_in_order() {
        let items: Vec<usize> = (0..57).collect();
        for size in PageSize::ALL {
            let joined: Vec<usize> = (0..page_count(items.len(), size))
                .flat_map(|page| items[window(items.len(), page, size)].to_vec())
                .collect();
            assert_eq!(joined, items);
        }
    }

    #[test]
    fn page_count_and_clamp() {
        assert_eq!(page_count(0, PageSize::Ten), 1);
        assert_eq!(page_count(10, PageSize::Ten), 1);
        assert_eq!(page_count(11, PageSize::Ten), 2);
        assert_eq!(clamp_page(5, 11, PageSize::Ten), 1);
        assert_eq!(clamp_page(0, 0, PageSize::Hundred), 0);
    }

    #[test]
    fn rows_round_trip() {
        for size in PageSize::ALL {
            assert_eq!(PageSize::from_rows(size.rows()), Some(size));
        }
        assert_eq!(PageSize::from_rows(15), None);
    }
}
