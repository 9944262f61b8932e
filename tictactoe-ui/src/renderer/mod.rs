//! wgpu backend for draw lists

mod quad;

use quad::QuadPipeline;

use tao::window::Window;
use thiserror::Error;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration, TextureFormat};

use crate::{DrawList, Viewport};

#[derive(Error, Debug)]
pub enum RendererError {
    #[error("Failed to create wgpu adapter")]
    AdapterCreationFailed,
    #[error("Failed to request wgpu device: {0}")]
    DeviceRequestFailed(#[from] wgpu::RequestDeviceError),
    #[error("Failed to create surface: {0}")]
    SurfaceCreationFailed(#[from] wgpu::CreateSurfaceError),
    #[error("Unsupported or invalid window handle")]
    UnsupportedWindowHandle,
}

pub struct Renderer {
    device: Device,
    queue: Queue,
    surface: Surface<'static>,
    config: SurfaceConfiguration,
    quads: QuadPipeline,
}

impl Renderer {
    /// Create a renderer drawing into `window`.
    ///
    /// The surface does not borrow the window; the caller must keep the
    /// window alive for as long as the renderer exists.
    pub fn new(window: &Window, width: u32, height: u32) -> Result<Self, RendererError> {
        use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // tao hands out raw-window-handle 0.5 handles, wgpu 0.19 wants 0.6
        let window_handle = convert_window_handle(window.raw_window_handle())?;
        let display_handle = convert_display_handle(window.raw_display_handle())?;

        // SAFETY: the handles come from a live tao window that the owner
        // keeps alive longer than this surface.
        let surface = unsafe {
            instance.create_surface_unsafe(wgpu::SurfaceTargetUnsafe::RawHandle {
                raw_display_handle: display_handle,
                raw_window_handle: window_handle,
            })
        }?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RendererError::AdapterCreationFailed)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("tictactoe-ui device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            },
            None,
        ))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(RendererError::AdapterCreationFailed)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let quads = QuadPipeline::new(&device, &queue, surface_format);
        log::info!(
            "Renderer ready: {:?} on {}",
            surface_format,
            adapter.get_info().name
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            quads,
        })
    }

    /// Resize the renderer surface. Zero sizes (minimized) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn format(&self) -> TextureFormat {
        self.config.format
    }

    /// Clear the whole window and replay `list` inside the letterboxed
    /// canvas region.
    pub fn render(&mut self, list: &DrawList, viewport: &Viewport) -> Result<(), wgpu::SurfaceError> {
        let canvas = viewport.logical_size();
        self.quads.prepare(&self.device, &self.queue, list, canvas);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(list.clear_color().to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let rect = viewport.rect();
            if rect.w() >= 1.0 && rect.h() >= 1.0 {
                render_pass.set_viewport(rect.x(), rect.y(), rect.w(), rect.h(), 0.0, 1.0);
                self.quads.render(&mut render_pass);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn convert_window_handle(
    handle: raw_window_handle::RawWindowHandle,
) -> Result<wgpu::rwh::RawWindowHandle, RendererError> {
    use raw_window_handle::RawWindowHandle as Rwh05;
    use wgpu::rwh::RawWindowHandle as Rwh06;

    match handle {
        #[cfg(target_os = "macos")]
        Rwh05::AppKit(h) => {
            let ns_view = std::ptr::NonNull::new(h.ns_view as *mut _)
                .ok_or(RendererError::UnsupportedWindowHandle)?;
            Ok(Rwh06::AppKit(wgpu::rwh::AppKitWindowHandle::new(ns_view)))
        }
        #[cfg(target_os = "windows")]
        Rwh05::Win32(h) => {
            use std::num::NonZeroIsize;
            let hwnd = NonZeroIsize::new(h.hwnd as isize)
                .ok_or(RendererError::UnsupportedWindowHandle)?;
            let mut new_handle = wgpu::rwh::Win32WindowHandle::new(hwnd);
            new_handle.hinstance = NonZeroIsize::new(h.hinstance as isize);
            Ok(Rwh06::Win32(new_handle))
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        Rwh05::Xlib(h) => {
            let mut new_handle = wgpu::rwh::XlibWindowHandle::new(h.window);
            new_handle.visual_id = h.visual_id;
            Ok(Rwh06::Xlib(new_handle))
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        Rwh05::Xcb(h) => {
            use std::num::NonZeroU32;
            let window =
                NonZeroU32::new(h.window).ok_or(RendererError::UnsupportedWindowHandle)?;
            let mut new_handle = wgpu::rwh::XcbWindowHandle::new(window);
            new_handle.visual_id = NonZeroU32::new(h.visual_id);
            Ok(Rwh06::Xcb(new_handle))
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        Rwh05::Wayland(h) => {
            let surface = std::ptr::NonNull::new(h.surface as *mut _)
                .ok_or(RendererError::UnsupportedWindowHandle)?;
            Ok(Rwh06::Wayland(wgpu::rwh::WaylandWindowHandle::new(surface)))
        }
        _ => Err(RendererError::UnsupportedWindowHandle),
    }
}

fn convert_display_handle(
    handle: raw_window_handle::RawDisplayHandle,
) -> Result<wgpu::rwh::RawDisplayHandle, RendererError> {
    use raw_window_handle::RawDisplayHandle as Rdh05;
    use wgpu::rwh::RawDisplayHandle as Rdh06;

    match handle {
        #[cfg(target_os = "macos")]
        Rdh05::AppKit(_) => Ok(Rdh06::AppKit(wgpu::rwh::AppKitDisplayHandle::new())),
        #[cfg(target_os = "windows")]
        Rdh05::Windows(_) => Ok(Rdh06::Windows(wgpu::rwh::WindowsDisplayHandle::new())),
        #[cfg(all(unix, not(target_os = "macos")))]
        Rdh05::Xlib(h) => Ok(Rdh06::Xlib(wgpu::rwh::XlibDisplayHandle::new(
            std::ptr::NonNull::new(h.display as *mut _),
            h.screen,
        ))),
        #[cfg(all(unix, not(target_os = "macos")))]
        Rdh05::Xcb(h) => Ok(Rdh06::Xcb(wgpu::rwh::XcbDisplayHandle::new(
            std::ptr::NonNull::new(h.connection as *mut _),
            h.screen,
        ))),
        #[cfg(all(unix, not(target_os = "macos")))]
        Rdh05::Wayland(h) => {
            let display = std::ptr::NonNull::new(h.display as *mut _)
                .ok_or(RendererError::UnsupportedWindowHandle)?;
            Ok(Rdh06::Wayland(wgpu::rwh::WaylandDisplayHandle::new(display)))
        }
        _ => Err(RendererError::UnsupportedWindowHandle),
    }
}
