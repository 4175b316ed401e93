//! Water surface mesh.
//!
//! The surface is a single grid mesh built from [`SurfaceGrid`]. On the GPU
//! path it stays flat and `water.wgsl` displaces it. On the CPU path its
//! positions, normals and vertex colors are rewritten every frame from the
//! shared simulation.

use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, Mesh, MeshVertexAttribute, PrimitiveTopology, VertexAttributeValues},
        view::NoFrustumCulling,
    },
};
use shared::water::{SurfaceMeshData, SurfaceVertex, WaterSimulation};

use super::water_material::{
    create_vertex_color_material, create_water_material, WaterMaterial, WaterMaterialResource,
    WaterRenderSettings,
};

/// Marker for the water surface entity. Pointer rays only test against it.
#[derive(Component)]
pub struct WaterSurface;

#[derive(Resource)]
pub struct WaterSurfaceMesh {
    pub handle: Handle<Mesh>,
}

/// Scratch buffers for the CPU surface path, reused across frames.
#[derive(Resource, Default)]
pub struct CpuSurfaceBuffers {
    vertices: Vec<SurfaceVertex>,
    data: SurfaceMeshData,
}

/// Converts grid buffers into a Bevy mesh.
pub fn surface_mesh(data: SurfaceMeshData) -> Option<Mesh> {
    if data.is_empty() {
        return None;
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, Default::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, data.positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, data.normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, data.uvs);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, data.colors);
    mesh.insert_indices(Indices::U32(data.indices));
    Some(mesh)
}

pub fn setup_water_surface(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut water_materials: ResMut<Assets<WaterMaterial>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    simulation: Res<WaterSimulation>,
    settings: Res<WaterRenderSettings>,
) {
    let grid = simulation.grid();
    let Some(mesh) = surface_mesh(grid.mesh_data()) else {
        warn!("Water surface grid is empty, nothing to render");
        return;
    };
    let handle = meshes.add(mesh);

    let mut entity = commands.spawn((
        WaterSurface,
        Name::new("Water surface"),
        Mesh3d(handle.clone()),
        Transform::IDENTITY,
        NoFrustumCulling,
    ));

    if settings.cpu_surface() {
        entity.insert(MeshMaterial3d(
            standard_materials.add(create_vertex_color_material()),
        ));
        commands.insert_resource(CpuSurfaceBuffers {
            vertices: Vec::with_capacity(grid.vertex_count()),
            data: grid.mesh_data(),
        });
        info!(
            "Water surface: {} vertices, evaluated on the CPU",
            grid.vertex_count()
        );
    } else {
        let material = water_materials.add(create_water_material(simulation.config()));
        entity.insert(MeshMaterial3d(material.clone()));
        commands.insert_resource(WaterMaterialResource { handle: material });
        info!(
            "Water surface: {} vertices, displaced by the water shader",
            grid.vertex_count()
        );
    }

    commands.insert_resource(WaterSurfaceMesh { handle });
}

/// Writes the evaluated surface into the mesh (CPU path only).
pub fn update_cpu_surface(
    simulation: Res<WaterSimulation>,
    surface: Option<Res<WaterSurfaceMesh>>,
    buffers: Option<ResMut<CpuSurfaceBuffers>>,
    mut meshes: ResMut<Assets<Mesh>>,
    camera: Query<&GlobalTransform, With<Camera3d>>,
) {
    let (Some(surface), Some(mut buffers)) = (surface, buffers) else {
        return;
    };
    let Ok(camera) = camera.single() else {
        debug!("Camera not found");
        return;
    };
    let Some(mesh) = meshes.get_mut(&surface.handle) else {
        return;
    };

    let CpuSurfaceBuffers { vertices, data } = &mut *buffers;
    simulation.evaluate_surface(vertices, camera.translation());
    data.apply(vertices);

    write_attribute(mesh, Mesh::ATTRIBUTE_POSITION, &data.positions);
    write_attribute(mesh, Mesh::ATTRIBUTE_NORMAL, &data.normals);
    if let Some(VertexAttributeValues::Float32x4(colors)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_COLOR)
    {
        colors.copy_from_slice(&data.colors);
    }
}

fn write_attribute(mesh: &mut Mesh, attribute: MeshVertexAttribute, values: &[[f32; 3]]) {
    if let Some(VertexAttributeValues::Float32x3(existing)) = mesh.attribute_mut(attribute) {
        if existing.len() == values.len() {
            existing.copy_from_slice(values);
            return;
        }
    }
    mesh.insert_attribute(attribute, values.to_vec());
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::water::config::SurfaceParams;
    use shared::water::SurfaceGrid;

    #[test]
    fn test_empty_data_has_no_mesh() {
        assert!(surface_mesh(SurfaceMeshData::default()).is_none());
    }

    #[test]
    fn test_surface_mesh_attributes() {
        let grid = SurfaceGrid::new(SurfaceParams {
            size: 10.0,
            segments: 2,
        });
        let mesh = surface_mesh(grid.mesh_data()).unwrap();
        assert_eq!(mesh.count_vertices(), 9);
        assert!(mesh.attribute(Mesh::ATTRIBUTE_COLOR).is_some());
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
        assert_eq!(mesh.indices().map(|i| i.len()), Some(2 * 2 * 6));
    }

    #[test]
    fn test_write_attribute_in_place() {
        let grid = SurfaceGrid::new(SurfaceParams {
            size: 10.0,
            segments: 1,
        });
        let mut mesh = surface_mesh(grid.mesh_data()).unwrap();
        let raised = vec![[0.0, 2.0, 0.0]; 4];
        write_attribute(&mut mesh, Mesh::ATTRIBUTE_POSITION, &raised);
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(values)) => assert_eq!(values, &raised),
            other => panic!("unexpected attribute {other:?}"),
        }
    }
}
