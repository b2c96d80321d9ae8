//! SDL2_image calls

use std::ptr::NonNull;

use sdl2_sys as sys;
use sys::image as img;

use super::{c_string, Sdl};
use crate::backend::Image;

impl Image for Sdl {
    fn img_init(flags: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { img::IMG_Init(flags) }
    }

    fn img_quit() {
        // SAFETY: plain library call
        unsafe { img::IMG_Quit() }
    }

    fn img_load(path: &str) -> *mut sys::SDL_Surface {
        let path = c_string(path);
        // SAFETY: C strings outlive the call
        unsafe { img::IMG_Load(path.as_ptr()) }.cast()
    }

    fn img_load_texture(renderer: NonNull<sys::SDL_Renderer>, path: &str) -> *mut sys::SDL_Texture {
        let path = c_string(path);
        // SAFETY: live handles owned by wrappers and C strings outlive the call
        unsafe { img::IMG_LoadTexture(renderer.as_ptr().cast(), path.as_ptr()) }.cast()
    }

    fn img_save_png(surface: NonNull<sys::SDL_Surface>, path: &str) -> i32 {
        let path = c_string(path);
        // SAFETY: live handles owned by wrappers and C strings outlive the call
        unsafe { img::IMG_SavePNG(surface.as_ptr().cast(), path.as_ptr()) }
    }

    fn img_save_jpg(surface: NonNull<sys::SDL_Surface>, path: &str, quality: i32) -> i32 {
        let path = c_string(path);
        // SAFETY: live handles owned by wrappers and C strings outlive the call
        unsafe { img::IMG_SaveJPG(surface.as_ptr().cast(), path.as_ptr(), quality) }
    }
}
