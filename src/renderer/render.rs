use egui_wgpu::ScreenDescriptor;

use crate::coin::Coin;
use crate::renderer::camera::CameraState;
use crate::renderer::renderer::Renderer;
use crate::renderer::vertex::SceneUniform;

/// Directional light position; the light shines from here toward the origin.
const LIGHT_POSITION: [f32; 3] = [5.0, 5.0, 5.0];
const LIGHT_INTENSITY: f32 = 1.0;
const AMBIENT_INTENSITY: f32 = 0.5;

pub(crate) fn scene_uniform(coin: &Coin, camera: &CameraState, aspect: f32) -> SceneUniform {
    let eye = camera.eye();
    let light = nalgebra_glm::normalize(&nalgebra_glm::make_vec3(&LIGHT_POSITION));
    SceneUniform {
        view_proj: camera.view_proj(aspect).into(),
        model: coin.model_matrix().into(),
        camera_pos: [eye.x, eye.y, eye.z, 1.0],
        light_dir: [light.x, light.y, light.z, LIGHT_INTENSITY],
        ambient: [1.0, 1.0, 1.0, AMBIENT_INTENSITY],
    }
}

impl Renderer {
    pub fn render(
        &mut self,
        coin: &Coin,
        camera: &CameraState,
        paint_jobs: Vec<egui::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
        screen_descriptor: ScreenDescriptor,
    ) -> Result<(), wgpu::SurfaceError> {
        // Skip rendering if window size is invalid (minimized, not ready, etc.)
        if self.config.width == 0 || self.config.height == 0 {
            return Ok(());
        }

        let uniform = scene_uniform(coin, camera, self.aspect());
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[uniform]));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (color_view, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(&view)),
            None => (&view, None),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Coin Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.background_color[0] as f64,
                            g: self.background_color[1] as f64,
                            b: self.background_color[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            for group in &self.groups {
                let Some(binding) = self.parts.iter().find(|p| p.part == group.part) else {
                    continue;
                };
                render_pass.set_bind_group(1, &binding.texture_bind_group, &[]);
                render_pass.set_bind_group(2, &binding.material_bind_group, &[]);
                render_pass.draw_indexed(
                    group.index_start..(group.index_start + group.index_count),
                    0,
                    0..1,
                );
            }
        }

        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut egui_rpass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui render pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut egui_rpass, &paint_jobs, &screen_descriptor);
        }

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
