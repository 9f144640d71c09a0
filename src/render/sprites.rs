// Decoded sprite handles keyed by role, plus the browser loader for them.
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlImageElement;

use crate::config::AssetPaths;
use crate::error::ViewError;
use crate::state::SpriteRole;

/// One optional handle per role. Absent handles make the renderer skip that draw.
#[derive(Clone, Debug)]
pub struct SpriteSheet<I> {
    slots: [Option<I>; 9],
}

impl<I> Default for SpriteSheet<I> {
    fn default() -> Self {
        Self {
            slots: Default::default(),
        }
    }
}

impl<I> SpriteSheet<I> {
    pub fn get(&self, role: SpriteRole) -> Option<&I> {
        self.slots[role.index()].as_ref()
    }

    pub fn insert(&mut self, role: SpriteRole, image: I) {
        self.slots[role.index()] = Some(image);
    }

    #[cfg(test)]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

type LoadDone = Rc<dyn Fn(Result<SpriteSheet<HtmlImageElement>, ViewError>)>;

struct LoadBatch {
    paths: AssetPaths,
    sheet: SpriteSheet<HtmlImageElement>,
    next: usize,
    on_done: LoadDone,
    // keeps the current image's handlers alive until it settles
    handlers: Option<(Closure<dyn FnMut()>, Closure<dyn FnMut()>)>,
}

/// Loads every role in [`SpriteRole::ALL`] order, one after another.
/// The first failure aborts the batch; nothing is published until all have loaded.
pub fn load_sprites(paths: AssetPaths, on_done: LoadDone) {
    let batch = Rc::new(RefCell::new(LoadBatch {
        paths,
        sheet: SpriteSheet::default(),
        next: 0,
        on_done,
        handlers: None,
    }));
    load_next(batch);
}

fn load_next(batch: Rc<RefCell<LoadBatch>>) {
    let (role, src) = {
        let b = batch.borrow();
        match SpriteRole::ALL.get(b.next) {
            Some(role) => (*role, b.paths.path(*role).to_string()),
            None => {
                drop(b);
                finish(&batch, None);
                return;
            }
        }
    };
    let img = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(err) => {
            finish(&batch, Some(ViewError::from(err)));
            return;
        }
    };

    let onload = {
        let batch = batch.clone();
        let img = img.clone();
        Closure::<dyn FnMut()>::wrap(Box::new(move || {
            {
                let mut b = batch.borrow_mut();
                b.sheet.insert(role, img.clone());
                b.next += 1;
            }
            let batch = batch.clone();
            // continue outside of this handler so it can be dropped safely
            defer(move || load_next(batch));
        }))
    };
    let onerror = {
        let batch = batch.clone();
        let src = src.clone();
        Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let err = ViewError::AssetLoad {
                role: role.name(),
                src: src.clone(),
            };
            let batch = batch.clone();
            defer(move || finish(&batch, Some(err)));
        }))
    };
    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    batch.borrow_mut().handlers = Some((onload, onerror));
    img.set_src(&src);
}

fn finish(batch: &Rc<RefCell<LoadBatch>>, err: Option<ViewError>) {
    let (on_done, sheet) = {
        let mut b = batch.borrow_mut();
        b.handlers = None;
        (b.on_done.clone(), std::mem::take(&mut b.sheet))
    };
    match err {
        Some(err) => on_done(Err(err)),
        None => on_done(Ok(sheet)),
    }
}

/// Runs `f` on the next macrotask.
fn defer(f: impl FnOnce() + 'static) {
    let _ = gloo::timers::callback::Timeout::new(0, f).forget();
}
