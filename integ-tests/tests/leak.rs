//! Every allocation made while parsing is released again, on success and on
//! every failure path.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

struct Counting;

thread_local! {
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
}

fn track(delta: isize) {
    let _ = LIVE_BYTES.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            track(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        track(-(layout.size() as isize));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new = unsafe { System.realloc(ptr, layout, new_size) };
        if !new.is_null() {
            track(new_size as isize - layout.size() as isize);
        }
        new
    }
}

#[global_allocator]
static ALLOCATOR: Counting = Counting;

fn live_bytes() -> isize {
    LIVE_BYTES.with(Cell::get)
}

const DOCUMENTS: &[&str] = &[
    "a = 1\nb = 'two'\nc = [1, 2, {d = 3}]\n[t]\nx.y.z = 1979-05-27T07:32:00Z\n",
    "[[a]]\nx=1\n[[a]]\nx=2\n[a.b]\nc = \"\\U0001F600\"\n",
    // Failures at increasing depths of a partially built tree.
    "a = 1\n[[a]]\n",
    "a = [1, 2, [3, {b = 'c'\n",
    "t = { a = [ { b = [ 'x', 'y' ], c = \"\\ud800\" } ] }",
    "[x.y]\nz = 1\n[x.y.z.w]\n",
    "k0=0\nk1=1\nk2=2\nk3=3\nk4=4\nk5=5\nk6=6\nk7=\"open\n",
    "s = \"\"\"long string\nthat never ends",
    "n = 9223372036854775808",
];

#[test]
fn parsing_releases_everything() {
    // Warm up lazily initialized runtime state.
    for doc in DOCUMENTS {
        let _ = toml_tree::parse(doc);
    }

    for doc in DOCUMENTS {
        let before = live_bytes();
        let result = toml_tree::parse(doc);
        let ok = result.is_ok();
        drop(result);
        assert_eq!(live_bytes(), before, "leaked while parsing {doc:?} (ok: {ok})");
    }

    let before = live_bytes();
    let mut table = toml_tree::parse(DOCUMENTS[0]).unwrap();
    let replaced = table.insert("a", toml_tree::Value::Array(toml_tree::Array::new()));
    assert!(replaced.is_some());
    drop(replaced);
    drop(table);
    assert_eq!(live_bytes(), before);
}
